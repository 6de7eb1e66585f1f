pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod store;
pub mod ui;

pub use error::{AppError, Result};
