//! GUI panels and application state.

pub mod app;
pub mod appointment_panel;
pub mod components;
pub mod crew_panel;
pub mod customer_panel;
pub mod dashboard_panel;
pub mod forms;

pub use app::App;
