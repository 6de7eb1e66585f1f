//! Appointment management panel with CRUD, filters, and inline status changes.

use chrono::Local;
use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, CALENDAR_PLUS, PENCIL, TRASH};

use super::app::{App, DeleteTarget, ResourceKind, Tab};
use super::components::{
    action_button, colors, danger_action_button, money, panel_header, primary_button_with_icon, status_color,
    styled_button, styled_button_with_icon,
};
use super::forms::AppointmentForm;
use crate::models::appointment::{DATE_FORMAT, parse_date};
use crate::models::{Appointment, AppointmentStatus, Customer, Resource, find_by_id, format_duration};

/// Deferred row action, applied once the table borrow ends.
enum RowAction {
    SetStatus(Appointment, AppointmentStatus),
}

/// Show the appointments panel.
pub fn show(app: &mut App, ui: &mut Ui) {
    panel_header(ui, "Appointments", "Scheduled moves, assigned crews and costs");

    ui.horizontal(|ui| {
        if primary_button_with_icon(ui, CALENDAR_PLUS, "New Appointment").clicked() {
            app.appointment_form = AppointmentForm::open_new(Local::now().date_naive());
        }

        ui.add_space(10.0);

        if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Refresh").clicked() {
            app.refresh_tab(Tab::Appointments);
        }

        ui.add_space(20.0);

        ui.label("Status:");
        if ui
            .selectable_label(app.appointment_status_filter.is_none(), "All")
            .clicked()
        {
            app.appointment_status_filter = None;
        }
        for status in AppointmentStatus::ALL {
            if ui
                .selectable_label(app.appointment_status_filter == Some(status), status.label())
                .clicked()
            {
                app.appointment_status_filter = Some(status);
            }
        }
    });

    ui.add_space(15.0);

    if let Some(RowAction::SetStatus(appointment, status)) = show_table(app, ui) {
        app.log_info(format!("Appointment #{}: {} -> {}", appointment.id, appointment.status.label(), status.label()));
        app.update_status(appointment, status);
    }

    if app.appointment_form.is_open {
        show_form_dialog(app, ui.ctx());
    }
}

fn customer_name(customers: &[Customer], id: i64) -> &str {
    find_by_id(customers, id).map(|c| c.name.as_str()).unwrap_or("N/A")
}

fn show_table(app: &mut App, ui: &mut Ui) -> Option<RowAction> {
    let mut action = None;

    let filtered: Vec<&Appointment> = app
        .appointments
        .iter()
        .filter(|a| app.appointment_status_filter.is_none_or(|s| a.status == s))
        .collect();

    ui.label(format!(
        "Showing {} of {} appointments",
        filtered.len(),
        app.appointments.len()
    ));

    ui.add_space(10.0);

    if filtered.is_empty() {
        ui.weak("No appointments");
        return None;
    }

    ScrollArea::horizontal().id_salt("appointments_scroll").show(ui, |ui| {
        egui::Grid::new("appointments_grid")
            .num_columns(8)
            .striped(true)
            .min_col_width(60.0)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                // Header
                ui.strong("Customer");
                ui.strong("Date / Time");
                ui.strong("Route");
                ui.strong("Crew");
                ui.strong("Status");
                ui.strong("Est. Cost");
                ui.strong("Actual");
                ui.strong("Actions");
                ui.end_row();

                for appt in filtered {
                    ui.label(customer_name(&app.customers, appt.customer_id));

                    ui.vertical(|ui| {
                        ui.label(format!("{} {}", appt.appointment_date, appt.appointment_time));
                        ui.label(
                            RichText::new(format!("Duration: {}", format_duration(appt.estimated_duration)))
                                .small()
                                .weak(),
                        );
                    });

                    ui.vertical(|ui| {
                        ui.label(RichText::new(format!("From: {}", appt.origin_address)).small());
                        ui.label(RichText::new(format!("To: {}", appt.destination_address)).small());
                    });

                    let crew = appt
                        .crew_id
                        .and_then(|id| find_by_id(&app.crews, id))
                        .map(|c| c.name.as_str())
                        .unwrap_or("Unassigned");
                    ui.label(crew);

                    let mut selected = appt.status;
                    egui::ComboBox::from_id_salt(("appt_status", appt.id))
                        .width(110.0)
                        .selected_text(RichText::new(selected.label()).color(status_color(selected)))
                        .show_ui(ui, |ui| {
                            for status in AppointmentStatus::ALL {
                                ui.selectable_value(&mut selected, status, status.label());
                            }
                        });
                    if selected != appt.status {
                        action = Some(RowAction::SetStatus(appt.clone(), selected));
                    }

                    ui.label(money(appt.estimated_cost).unwrap_or_else(|| "-".to_string()));
                    ui.label(money(appt.actual_cost).unwrap_or_else(|| "-".to_string()));

                    ui.horizontal(|ui| {
                        if action_button(ui, PENCIL, "Edit").clicked() {
                            app.appointment_form = AppointmentForm::edit(appt);
                        }
                        ui.add_space(4.0);
                        if danger_action_button(ui, TRASH, "Delete").clicked() {
                            app.delete_target = Some(DeleteTarget::Appointment(appt.id, appt.display_name()));
                        }
                    });

                    ui.end_row();
                }
            });
    });

    action
}

/// Text field with red text and a hint line when the content does not parse.
fn validated_field(ui: &mut Ui, text: &mut String, hint: &str, is_valid: bool) {
    ui.vertical(|ui| {
        let text_color = if is_valid {
            ui.visuals().text_color()
        } else {
            colors::ERROR
        };
        ui.add(
            egui::TextEdit::singleline(text)
                .desired_width(120.0)
                .hint_text(hint)
                .text_color(text_color),
        );
        if is_valid {
            ui.weak(format!("Format: {hint}"));
        } else {
            ui.colored_label(colors::ERROR, "Invalid format");
        }
    });
}

fn show_form_dialog(app: &mut App, ctx: &egui::Context) {
    let title = if app.appointment_form.is_editing() {
        "Edit Appointment"
    } else {
        "New Appointment"
    };

    egui::Window::new(title)
        .id(egui::Id::new("appointment_form"))
        .collapsible(false)
        .resizable(false)
        .default_width(480.0)
        .max_height(600.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(10.0);

            ScrollArea::vertical().max_height(480.0).show(ui, |ui| {
                egui::Grid::new("appointment_form_grid")
                    .num_columns(2)
                    .spacing([20.0, 10.0])
                    .show(ui, |ui| {
                        let form = &mut app.appointment_form;

                        ui.label("Customer:");
                        egui::ComboBox::from_id_salt("appt_form_customer")
                            .width(250.0)
                            .selected_text(
                                form.customer_id
                                    .map(|id| customer_name(&app.customers, id))
                                    .unwrap_or("Select customer..."),
                            )
                            .show_ui(ui, |ui| {
                                for customer in &app.customers {
                                    ui.selectable_value(&mut form.customer_id, Some(customer.id), &customer.name);
                                }
                            });
                        ui.end_row();

                        ui.label("Crew:");
                        egui::ComboBox::from_id_salt("appt_form_crew")
                            .width(250.0)
                            .selected_text(
                                form.crew_id
                                    .and_then(|id| find_by_id(&app.crews, id))
                                    .map(|c| c.name.as_str())
                                    .unwrap_or("Unassigned"),
                            )
                            .show_ui(ui, |ui| {
                                let current = form.crew_id;
                                ui.selectable_value(&mut form.crew_id, None, "Unassigned");
                                // Inactive crews stay listed only when already assigned.
                                for crew in app.crews.iter().filter(|c| c.is_active || current == Some(c.id)) {
                                    ui.selectable_value(&mut form.crew_id, Some(crew.id), &crew.name);
                                }
                            });
                        ui.end_row();

                        ui.label("Date:");
                        ui.horizontal(|ui| {
                            let date_valid = form.date_is_valid();
                            validated_field(ui, &mut form.appointment_date, "YYYY-MM-DD", date_valid);

                            let mut picked = parse_date(&form.appointment_date).unwrap_or_else(|| Local::now().date_naive());
                            let before = picked;
                            ui.add(egui_extras::DatePickerButton::new(&mut picked).id_salt("appt_form_date"));
                            if picked != before {
                                form.appointment_date = picked.format(DATE_FORMAT).to_string();
                            }
                        });
                        ui.end_row();

                        ui.label("Time:");
                        let time_valid = form.time_is_valid();
                        validated_field(ui, &mut form.appointment_time, "HH:MM", time_valid);
                        ui.end_row();

                        ui.label("Duration (min):");
                        ui.add(
                            egui::TextEdit::singleline(&mut form.estimated_duration)
                                .desired_width(100.0)
                                .hint_text("Optional"),
                        );
                        ui.end_row();

                        ui.label("From:");
                        ui.add(
                            egui::TextEdit::multiline(&mut form.origin_address)
                                .desired_width(250.0)
                                .desired_rows(2),
                        );
                        ui.end_row();

                        ui.label("To:");
                        ui.add(
                            egui::TextEdit::multiline(&mut form.destination_address)
                                .desired_width(250.0)
                                .desired_rows(2),
                        );
                        ui.end_row();

                        ui.label("Status:");
                        egui::ComboBox::from_id_salt("appt_form_status")
                            .width(150.0)
                            .selected_text(form.status.label())
                            .show_ui(ui, |ui| {
                                for status in AppointmentStatus::ALL {
                                    ui.selectable_value(&mut form.status, status, status.label());
                                }
                            });
                        ui.end_row();

                        ui.label("Estimated Cost:");
                        ui.add(
                            egui::TextEdit::singleline(&mut form.estimated_cost)
                                .desired_width(100.0)
                                .hint_text("0.00"),
                        );
                        ui.end_row();

                        ui.label("Actual Cost:");
                        ui.add(
                            egui::TextEdit::singleline(&mut form.actual_cost)
                                .desired_width(100.0)
                                .hint_text("0.00"),
                        );
                        ui.end_row();

                        ui.label("Notes:");
                        ui.add(
                            egui::TextEdit::multiline(&mut form.notes)
                                .desired_width(250.0)
                                .desired_rows(3),
                        );
                        ui.end_row();
                    });
            });

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                if styled_button(ui, "Cancel").clicked() {
                    app.appointment_form.reset();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if primary_button_with_icon(ui, "", "Save").clicked() {
                        save_appointment(app);
                    }
                });
            });
        });
}

fn save_appointment(app: &mut App) {
    match app.appointment_form.to_input() {
        Ok(input) => {
            let id = app.appointment_form.id;
            app.log_info(format!(
                "Saving appointment on {} {}",
                input.appointment_date, input.appointment_time
            ));
            app.save::<Appointment>(ResourceKind::Appointment, id, input);
        }
        Err(e) => app.report_error("Appointment", &e),
    }
}
