//! Shared UI components.

use eframe::egui::{self, Color32, CornerRadius, Margin, Response, RichText, Ui};

use crate::models::AppointmentStatus;

/// Status indicator colors.
pub mod colors {
    use super::Color32;

    pub const SUCCESS: Color32 = Color32::from_rgb(100, 200, 100);
    pub const ERROR: Color32 = Color32::from_rgb(255, 100, 100);
    pub const WARNING: Color32 = Color32::from_rgb(255, 200, 100);
    pub const NEUTRAL: Color32 = Color32::from_rgb(150, 150, 150);
    pub const INFO: Color32 = Color32::from_rgb(100, 150, 230);
    pub const PRIMARY: Color32 = Color32::from_rgb(37, 99, 235);
    pub const DANGER: Color32 = Color32::from_rgb(200, 60, 60);
}

/// Badge color for an appointment status.
pub fn status_color(status: AppointmentStatus) -> Color32 {
    match status {
        AppointmentStatus::Scheduled => colors::INFO,
        AppointmentStatus::InProgress => colors::WARNING,
        AppointmentStatus::Completed => colors::SUCCESS,
        AppointmentStatus::Cancelled => colors::ERROR,
    }
}

/// Render a small colored pill with text.
pub fn badge(ui: &mut Ui, text: &str, color: Color32) {
    egui::Frame::new()
        .fill(color.gamma_multiply(0.2))
        .inner_margin(Margin::symmetric(6, 2))
        .corner_radius(CornerRadius::same(4))
        .show(ui, |ui| {
            ui.label(RichText::new(text).small().color(color));
        });
}

pub fn status_badge(ui: &mut Ui, status: AppointmentStatus) {
    badge(ui, status.label(), status_color(status));
}

pub fn active_badge(ui: &mut Ui, is_active: bool) {
    if is_active {
        badge(ui, "Active", colors::SUCCESS);
    } else {
        badge(ui, "Inactive", colors::NEUTRAL);
    }
}

/// Render a panel header with title and a short description.
pub fn panel_header(ui: &mut Ui, title: &str, description: &str) {
    ui.heading(RichText::new(title).size(24.0));
    ui.label(RichText::new(description).weak());
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(10.0);
}

/// Render a stat card with title, value, and subtitle.
pub fn stat_card(ui: &mut Ui, icon: &str, title: &str, value: &str, subtitle: &str) {
    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(Margin::same(15))
        .outer_margin(Margin::same(5))
        .corner_radius(CornerRadius::same(8))
        .show(ui, |ui| {
            ui.set_min_width(170.0);

            ui.vertical(|ui| {
                ui.label(RichText::new(format!("{icon} {title}")).small());
                ui.label(RichText::new(value).heading().strong());
                ui.label(RichText::new(subtitle).small().weak());
            });
        });
}

/// Filled call-to-action button.
pub fn primary_button_with_icon(ui: &mut Ui, icon: &str, label: &str) -> Response {
    let text = if icon.is_empty() {
        label.to_string()
    } else {
        format!("{icon} {label}")
    };
    ui.add(
        egui::Button::new(RichText::new(text).color(Color32::WHITE))
            .fill(colors::PRIMARY)
            .min_size(egui::vec2(90.0, 28.0)),
    )
}

pub fn styled_button(ui: &mut Ui, label: &str) -> Response {
    ui.add(egui::Button::new(label).min_size(egui::vec2(80.0, 28.0)))
}

pub fn styled_button_with_icon(ui: &mut Ui, icon: &str, label: &str) -> Response {
    styled_button(ui, &format!("{icon} {label}"))
}

/// Compact icon button for table rows.
pub fn action_button(ui: &mut Ui, icon: &str, tooltip: &str) -> Response {
    ui.add(egui::Button::new(icon).small()).on_hover_text(tooltip)
}

/// Compact icon button for destructive row actions.
pub fn danger_action_button(ui: &mut Ui, icon: &str, tooltip: &str) -> Response {
    ui.add(egui::Button::new(RichText::new(icon).color(colors::DANGER)).small())
        .on_hover_text(tooltip)
}

/// Framed section with a bold title.
pub fn section(ui: &mut Ui, title: &str, add_contents: impl FnOnce(&mut Ui)) {
    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(Margin::same(15))
        .corner_radius(CornerRadius::same(8))
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.label(RichText::new(title).strong());
            ui.add_space(10.0);
            add_contents(ui);
        });
}

/// Text shown for an absent optional value.
pub fn or_dash(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

/// Format an optional amount in dollars.
pub fn money(value: Option<f64>) -> Option<String> {
    value.map(|v| format!("${v:.2}"))
}
