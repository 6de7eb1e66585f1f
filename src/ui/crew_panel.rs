//! Crew and crew member management panel.

use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, PENCIL, PLUS, TRASH, USER_PLUS};

use super::app::{App, DeleteTarget, ResourceKind};
use super::components::{
    action_button, active_badge, danger_action_button, or_dash, panel_header, primary_button_with_icon,
    styled_button, styled_button_with_icon,
};
use super::forms::{CrewForm, CrewMemberForm};
use crate::models::{Crew, CrewMember, Position, find_by_id};

/// Show the crews panel.
pub fn show(app: &mut App, ui: &mut Ui) {
    panel_header(ui, "Crews", "Moving teams and the people on them");

    ui.horizontal(|ui| {
        if primary_button_with_icon(ui, PLUS, "Add Crew").clicked() {
            app.crew_form = CrewForm::open_new();
        }

        ui.add_space(10.0);

        if styled_button_with_icon(ui, USER_PLUS, "Add Member").clicked() {
            app.member_form = CrewMemberForm {
                crew_id: app.member_crew_filter,
                ..CrewMemberForm::open_new()
            };
        }

        ui.add_space(10.0);

        if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Refresh").clicked() {
            app.load_crews();
            app.load_crew_members();
        }
    });

    ui.add_space(15.0);

    show_crews_table(app, ui);

    ui.add_space(25.0);

    ui.horizontal(|ui| {
        ui.label(RichText::new("Crew Members").size(18.0).strong());
        ui.add_space(20.0);
        ui.label("Crew:");
        egui::ComboBox::from_id_salt("member_crew_filter")
            .width(180.0)
            .selected_text(crew_name(&app.crews, app.member_crew_filter, "All"))
            .show_ui(ui, |ui| {
                if ui.selectable_label(app.member_crew_filter.is_none(), "All").clicked() {
                    app.member_crew_filter = None;
                }
                for crew in &app.crews {
                    if ui
                        .selectable_label(app.member_crew_filter == Some(crew.id), &crew.name)
                        .clicked()
                    {
                        app.member_crew_filter = Some(crew.id);
                    }
                }
            });
    });

    ui.add_space(10.0);

    show_members_table(app, ui);

    if app.crew_form.is_open {
        show_crew_dialog(app, ui.ctx());
    }
    if app.member_form.is_open {
        show_member_dialog(app, ui.ctx());
    }
}

/// Name of the crew with `id`, or `fallback` when unset or unknown.
fn crew_name<'a>(crews: &'a [Crew], id: Option<i64>, fallback: &'a str) -> &'a str {
    id.and_then(|id| find_by_id(crews, id))
        .map(|c| c.name.as_str())
        .unwrap_or(fallback)
}

fn show_crews_table(app: &mut App, ui: &mut Ui) {
    if app.crews.is_empty() {
        ui.weak("No crews yet");
        return;
    }

    egui::Grid::new("crews_grid")
        .num_columns(5)
        .striped(true)
        .min_col_width(60.0)
        .spacing([12.0, 8.0])
        .show(ui, |ui| {
            ui.strong("Name");
            ui.strong("Description");
            ui.strong("Members");
            ui.strong("Status");
            ui.strong("Actions");
            ui.end_row();

            for crew in &app.crews {
                ui.label(&crew.name);
                ui.label(or_dash(&crew.description));
                ui.label(crew.members(&app.crew_members).count().to_string());
                active_badge(ui, crew.is_active);

                ui.horizontal(|ui| {
                    if action_button(ui, PENCIL, "Edit").clicked() {
                        app.crew_form = CrewForm::edit(crew);
                    }
                    ui.add_space(4.0);
                    if danger_action_button(ui, TRASH, "Delete").clicked() {
                        app.delete_target = Some(DeleteTarget::Crew(crew.id, crew.name.clone()));
                    }
                });

                ui.end_row();
            }
        });
}

fn show_members_table(app: &mut App, ui: &mut Ui) {
    let filtered: Vec<&CrewMember> = app
        .crew_members
        .iter()
        .filter(|m| app.member_crew_filter.is_none() || m.crew_id == app.member_crew_filter)
        .collect();

    if filtered.is_empty() {
        ui.weak("No crew members");
        return;
    }

    ScrollArea::horizontal().id_salt("members_scroll").show(ui, |ui| {
        egui::Grid::new("members_grid")
            .num_columns(7)
            .striped(true)
            .min_col_width(60.0)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.strong("Name");
                ui.strong("Crew");
                ui.strong("Position");
                ui.strong("Phone");
                ui.strong("Email");
                ui.strong("Status");
                ui.strong("Actions");
                ui.end_row();

                for member in filtered {
                    ui.label(&member.name);
                    ui.label(crew_name(&app.crews, member.crew_id, "Unassigned"));
                    ui.label(member.position.map(|p| p.as_str()).unwrap_or("-"));
                    ui.label(or_dash(&member.phone));
                    ui.label(or_dash(&member.email));
                    active_badge(ui, member.is_active);

                    ui.horizontal(|ui| {
                        if action_button(ui, PENCIL, "Edit").clicked() {
                            app.member_form = CrewMemberForm::edit(member);
                        }
                        ui.add_space(4.0);
                        if danger_action_button(ui, TRASH, "Delete").clicked() {
                            app.delete_target = Some(DeleteTarget::CrewMember(member.id, member.name.clone()));
                        }
                    });

                    ui.end_row();
                }
            });
    });
}

fn show_crew_dialog(app: &mut App, ctx: &egui::Context) {
    let title = if app.crew_form.is_editing() {
        "Edit Crew"
    } else {
        "Add Crew"
    };

    egui::Window::new(title)
        .id(egui::Id::new("crew_form"))
        .collapsible(false)
        .resizable(false)
        .default_width(420.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(10.0);

            egui::Grid::new("crew_form_grid")
                .num_columns(2)
                .spacing([20.0, 10.0])
                .show(ui, |ui| {
                    ui.label("Name:");
                    ui.add(egui::TextEdit::singleline(&mut app.crew_form.name).desired_width(250.0));
                    ui.end_row();

                    ui.label("Description:");
                    ui.add(
                        egui::TextEdit::multiline(&mut app.crew_form.description)
                            .desired_width(250.0)
                            .desired_rows(2),
                    );
                    ui.end_row();

                    ui.label("Active:");
                    ui.checkbox(&mut app.crew_form.is_active, "");
                    ui.end_row();
                });

            // Roster is read-only here; members are assigned from their own form.
            if let Some(id) = app.crew_form.id
                && let Some(crew) = find_by_id(&app.crews, id)
            {
                ui.add_space(10.0);
                let names: Vec<&str> = crew.members(&app.crew_members).map(|m| m.name.as_str()).collect();
                if names.is_empty() {
                    ui.weak("No members assigned");
                } else {
                    ui.weak(format!("Members: {}", names.join(", ")));
                }
            }

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                if styled_button(ui, "Cancel").clicked() {
                    app.crew_form.reset();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if primary_button_with_icon(ui, "", "Save").clicked() {
                        save_crew(app);
                    }
                });
            });
        });
}

fn show_member_dialog(app: &mut App, ctx: &egui::Context) {
    let title = if app.member_form.is_editing() {
        "Edit Crew Member"
    } else {
        "Add Crew Member"
    };

    egui::Window::new(title)
        .id(egui::Id::new("member_form"))
        .collapsible(false)
        .resizable(false)
        .default_width(420.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(10.0);

            egui::Grid::new("member_form_grid")
                .num_columns(2)
                .spacing([20.0, 10.0])
                .show(ui, |ui| {
                    ui.label("Name:");
                    ui.add(egui::TextEdit::singleline(&mut app.member_form.name).desired_width(250.0));
                    ui.end_row();

                    ui.label("Crew:");
                    egui::ComboBox::from_id_salt("member_form_crew")
                        .width(250.0)
                        .selected_text(crew_name(&app.crews, app.member_form.crew_id, "Unassigned"))
                        .show_ui(ui, |ui| {
                            if ui
                                .selectable_label(app.member_form.crew_id.is_none(), "Unassigned")
                                .clicked()
                            {
                                app.member_form.crew_id = None;
                            }
                            for crew in &app.crews {
                                if ui
                                    .selectable_label(app.member_form.crew_id == Some(crew.id), &crew.name)
                                    .clicked()
                                {
                                    app.member_form.crew_id = Some(crew.id);
                                }
                            }
                        });
                    ui.end_row();

                    ui.label("Position:");
                    egui::ComboBox::from_id_salt("member_form_position")
                        .width(250.0)
                        .selected_text(app.member_form.position.map(|p| p.as_str()).unwrap_or("Select..."))
                        .show_ui(ui, |ui| {
                            if ui
                                .selectable_label(app.member_form.position.is_none(), "None")
                                .clicked()
                            {
                                app.member_form.position = None;
                            }
                            for position in Position::ALL {
                                ui.selectable_value(&mut app.member_form.position, Some(position), position.as_str());
                            }
                        });
                    ui.end_row();

                    ui.label("Phone:");
                    ui.add(
                        egui::TextEdit::singleline(&mut app.member_form.phone)
                            .desired_width(250.0)
                            .hint_text("Optional"),
                    );
                    ui.end_row();

                    ui.label("Email:");
                    ui.add(
                        egui::TextEdit::singleline(&mut app.member_form.email)
                            .desired_width(250.0)
                            .hint_text("Optional"),
                    );
                    ui.end_row();

                    ui.label("Active:");
                    ui.checkbox(&mut app.member_form.is_active, "");
                    ui.end_row();
                });

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                if styled_button(ui, "Cancel").clicked() {
                    app.member_form.reset();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if primary_button_with_icon(ui, "", "Save").clicked() {
                        save_member(app);
                    }
                });
            });
        });
}

fn save_crew(app: &mut App) {
    match app.crew_form.to_input() {
        Ok(input) => {
            let id = app.crew_form.id;
            app.log_info(format!("Saving crew: {}", input.name));
            app.save::<Crew>(ResourceKind::Crew, id, input);
        }
        Err(e) => app.report_error("Crew", &e),
    }
}

fn save_member(app: &mut App) {
    match app.member_form.to_input() {
        Ok(input) => {
            let id = app.member_form.id;
            app.log_info(format!("Saving crew member: {}", input.name));
            app.save::<CrewMember>(ResourceKind::CrewMember, id, input);
        }
        Err(e) => app.report_error("Crew member", &e),
    }
}
