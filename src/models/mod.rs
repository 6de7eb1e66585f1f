//! Data models for customers, crews, crew members and appointments.

pub mod appointment;
pub mod crew;
pub mod customer;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use appointment::{Appointment, AppointmentInput, AppointmentStatus, format_duration};
pub use crew::{Crew, CrewInput, CrewMember, CrewMemberInput, Position};
pub use customer::{Customer, CustomerInput};

/// A CRUD-managed entity exposed by the API as `/api/{PATH}`.
pub trait Resource: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Request body for create and update (every field except `id`).
    type Input: Clone + Send + Sync + Serialize + 'static;

    /// Collection path segment under `/api`.
    const PATH: &'static str;

    /// Singular display name.
    const LABEL: &'static str;

    fn id(&self) -> i64;

    /// Short name used in confirmations and log messages.
    fn display_name(&self) -> String;

    /// Build a full record from an id and its input fields.
    fn with_id(id: i64, input: Self::Input) -> Self;

    /// Extract the input fields of this record.
    fn to_input(&self) -> Self::Input;
}

/// Find a record by id.
pub fn find_by_id<R: Resource>(items: &[R], id: i64) -> Option<&R> {
    items.iter().find(|item| item.id() == id)
}

/// Treat blank strings as absent.
pub(crate) fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}
