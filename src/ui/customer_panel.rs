//! Customer management panel with CRUD and search.

use eframe::egui::{self, ScrollArea, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, PENCIL, PLUS, TRASH};

use super::app::{App, DeleteTarget, ResourceKind};
use super::components::{
    action_button, danger_action_button, or_dash, panel_header, primary_button_with_icon, styled_button,
    styled_button_with_icon,
};
use super::forms::CustomerForm;
use crate::models::Customer;

/// Show the customers panel.
pub fn show(app: &mut App, ui: &mut Ui) {
    panel_header(ui, "Customers", "People and businesses we move");

    ui.horizontal(|ui| {
        if primary_button_with_icon(ui, PLUS, "Add Customer").clicked() {
            app.customer_form = CustomerForm::open_new();
        }

        ui.add_space(10.0);

        if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Refresh").clicked() {
            app.load_customers();
        }

        ui.add_space(20.0);

        ui.label("Search:");
        ui.add(
            egui::TextEdit::singleline(&mut app.customer_search)
                .desired_width(200.0)
                .hint_text("Name, phone or email..."),
        );
        if !app.customer_search.is_empty() && styled_button(ui, "Clear").clicked() {
            app.customer_search.clear();
        }
    });

    ui.add_space(15.0);

    show_table(app, ui);

    if app.customer_form.is_open {
        show_form_dialog(app, ui.ctx());
    }
}

fn matches_search(customer: &Customer, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let needle = needle.to_lowercase();
    std::iter::once(Some(&customer.name))
        .chain([customer.phone.as_ref(), customer.email.as_ref()])
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
}

fn show_table(app: &mut App, ui: &mut Ui) {
    let filtered: Vec<_> = app
        .customers
        .iter()
        .filter(|c| matches_search(c, app.customer_search.trim()))
        .collect();

    ui.label(format!(
        "Showing {} of {} customers",
        filtered.len(),
        app.customers.len()
    ));

    ui.add_space(10.0);

    if app.customers.is_empty() {
        ui.weak("No customers yet");
        return;
    }

    ScrollArea::horizontal().id_salt("customers_scroll").show(ui, |ui| {
        egui::Grid::new("customers_grid")
            .num_columns(5)
            .striped(true)
            .min_col_width(60.0)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                // Header
                ui.strong("Name");
                ui.strong("Phone");
                ui.strong("Email");
                ui.strong("Address");
                ui.strong("Actions");
                ui.end_row();

                for customer in filtered {
                    ui.label(&customer.name);
                    ui.label(or_dash(&customer.phone));
                    ui.label(or_dash(&customer.email));
                    ui.label(or_dash(&customer.address));

                    ui.horizontal(|ui| {
                        if action_button(ui, PENCIL, "Edit").clicked() {
                            app.customer_form = CustomerForm::edit(customer);
                        }
                        ui.add_space(4.0);
                        if danger_action_button(ui, TRASH, "Delete").clicked() {
                            app.delete_target = Some(DeleteTarget::Customer(customer.id, customer.name.clone()));
                        }
                    });

                    ui.end_row();
                }
            });
    });
}

fn show_form_dialog(app: &mut App, ctx: &egui::Context) {
    let title = if app.customer_form.is_editing() {
        "Edit Customer"
    } else {
        "Add Customer"
    };

    egui::Window::new(title)
        .id(egui::Id::new("customer_form"))
        .collapsible(false)
        .resizable(false)
        .default_width(420.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(10.0);

            egui::Grid::new("customer_form_grid")
                .num_columns(2)
                .spacing([20.0, 10.0])
                .show(ui, |ui| {
                    ui.label("Name:");
                    ui.add(egui::TextEdit::singleline(&mut app.customer_form.name).desired_width(250.0));
                    ui.end_row();

                    ui.label("Phone:");
                    ui.add(
                        egui::TextEdit::singleline(&mut app.customer_form.phone)
                            .desired_width(250.0)
                            .hint_text("Optional"),
                    );
                    ui.end_row();

                    ui.label("Email:");
                    ui.add(
                        egui::TextEdit::singleline(&mut app.customer_form.email)
                            .desired_width(250.0)
                            .hint_text("Optional"),
                    );
                    ui.end_row();

                    ui.label("Address:");
                    ui.add(
                        egui::TextEdit::multiline(&mut app.customer_form.address)
                            .desired_width(250.0)
                            .desired_rows(2),
                    );
                    ui.end_row();
                });

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                if styled_button(ui, "Cancel").clicked() {
                    app.customer_form.reset();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if primary_button_with_icon(ui, "", "Save").clicked() {
                        save_customer(app);
                    }
                });
            });
        });
}

fn save_customer(app: &mut App) {
    match app.customer_form.to_input() {
        Ok(input) => {
            let id = app.customer_form.id;
            app.log_info(format!("Saving customer: {}", input.name));
            app.save::<Customer>(ResourceKind::Customer, id, input);
        }
        Err(e) => app.report_error("Customer", &e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_matches_any_contact_field() {
        let customer = Customer {
            id: 1,
            name: "Sarah Johnson".to_string(),
            phone: Some("(555) 987-6543".to_string()),
            email: None,
            address: None,
        };

        assert!(matches_search(&customer, ""));
        assert!(matches_search(&customer, "sarah"));
        assert!(matches_search(&customer, "987"));
        assert!(!matches_search(&customer, "example.com"));
    }
}
