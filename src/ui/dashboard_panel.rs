//! Dashboard panel with stats, quick actions, upcoming moves, and activity log.

use chrono::Local;
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{
    ARROWS_CLOCKWISE, CALENDAR, CALENDAR_CHECK, CALENDAR_PLUS, MAP_PIN, USER_PLUS, USERS, USERS_THREE,
};

use super::app::{App, LogLevel, Tab};
use super::components::{colors, panel_header, section, stat_card, status_badge, styled_button_with_icon};
use super::forms::{AppointmentForm, CrewForm, CustomerForm};

/// Show the dashboard panel.
///
/// Returns `Some(tab)` if navigation is requested.
pub fn show(app: &mut App, ui: &mut Ui) -> Option<Tab> {
    let mut next_tab = None;

    panel_header(ui, "Dashboard", "Overview of today's moves and the schedule ahead");

    if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Refresh").clicked() {
        app.load_dashboard();
    }

    ui.add_space(10.0);

    let stats = &app.dashboard;

    // Stat cards row
    ui.horizontal_wrapped(|ui| {
        stat_card(
            ui,
            CALENDAR,
            "Total Appointments",
            &stats.total_appointments.to_string(),
            "All scheduled moves",
        );
        stat_card(
            ui,
            CALENDAR_CHECK,
            "Today",
            &stats.today_appointments.to_string(),
            &Local::now().format("%A, %B %-d").to_string(),
        );
        stat_card(
            ui,
            USERS,
            "Customers",
            &stats.total_customers.to_string(),
            "Registered customers",
        );
        stat_card(
            ui,
            USERS_THREE,
            "Crews",
            &stats.total_crews.to_string(),
            "Moving crews",
        );
    });

    ui.add_space(20.0);

    // Two-column layout: Upcoming | Quick Actions + Recent Activity
    let available_width = ui.available_width();
    let wide = (available_width - 20.0) * 0.6;
    let narrow = (available_width - 20.0) * 0.4;

    ui.horizontal_top(|ui| {
        ui.vertical(|ui| {
            ui.set_width(wide);
            section(ui, "Upcoming Appointments", |ui| show_upcoming(app, ui));
        });

        ui.add_space(20.0);

        ui.vertical(|ui| {
            ui.set_width(narrow);

            section(ui, "Quick Actions", |ui| {
                if ui.button(format!("{CALENDAR_PLUS} New Appointment")).clicked() {
                    app.appointment_form = AppointmentForm::open_new(Local::now().date_naive());
                    next_tab = Some(Tab::Appointments);
                }

                ui.add_space(5.0);

                if ui.button(format!("{USER_PLUS} Add Customer")).clicked() {
                    app.customer_form = CustomerForm::open_new();
                    next_tab = Some(Tab::Customers);
                }

                ui.add_space(5.0);

                if ui.button(format!("{USERS_THREE} Add Crew")).clicked() {
                    app.crew_form = CrewForm::open_new();
                    next_tab = Some(Tab::Crews);
                }
            });

            ui.add_space(15.0);

            section(ui, "Recent Activity", |ui| show_activity(app, ui));
        });
    });

    next_tab
}

fn show_upcoming(app: &App, ui: &mut Ui) {
    let upcoming = &app.dashboard.upcoming;

    if upcoming.is_empty() {
        ui.label(RichText::new("No upcoming appointments").weak());
        return;
    }

    for (i, item) in upcoming.iter().enumerate() {
        if i > 0 {
            ui.separator();
        }

        ui.horizontal(|ui| {
            ui.label(RichText::new(&item.customer).strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                status_badge(ui, item.status);
            });
        });
        ui.label(format!("{CALENDAR} {} at {}", item.date, item.time));
        ui.label(
            RichText::new(format!("{MAP_PIN} {} \u{2192} {}", item.origin, item.destination))
                .small()
                .weak(),
        );
    }
}

fn show_activity(app: &App, ui: &mut Ui) {
    ScrollArea::vertical()
        .id_salt("activity_scroll")
        .max_height(180.0)
        .show(ui, |ui| {
            if app.log_messages.is_empty() {
                ui.label(RichText::new("No recent activity").weak());
                return;
            }

            for entry in app.log_messages.iter().rev().take(10) {
                let color = match entry.level {
                    LogLevel::Info => Color32::GRAY,
                    LogLevel::Success => colors::SUCCESS,
                    LogLevel::Error => colors::ERROR,
                };

                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(entry.timestamp.format("%H:%M:%S").to_string())
                            .small()
                            .color(Color32::DARK_GRAY),
                    );
                    ui.label(RichText::new(&entry.message).color(color));
                });
            }
        });
}
