//! Appointment record, status workflow and scheduling helpers.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::Resource;

/// Date format used on the wire.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Appointment lifecycle tag. Any transition is permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 4] = [
        AppointmentStatus::Scheduled,
        AppointmentStatus::InProgress,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
    ];

    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::InProgress => "in_progress",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "Scheduled",
            AppointmentStatus::InProgress => "In Progress",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scheduled move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub customer_id: i64,
    pub crew_id: Option<i64>,
    pub appointment_date: String,
    pub appointment_time: String,
    /// Minutes.
    pub estimated_duration: Option<i32>,
    pub origin_address: String,
    pub destination_address: String,
    #[serde(default)]
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub estimated_cost: Option<f64>,
    pub actual_cost: Option<f64>,
}

/// DTO for creating or updating an appointment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentInput {
    pub customer_id: i64,
    pub crew_id: Option<i64>,
    pub appointment_date: String,
    pub appointment_time: String,
    pub estimated_duration: Option<i32>,
    pub origin_address: String,
    pub destination_address: String,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub estimated_cost: Option<f64>,
    pub actual_cost: Option<f64>,
}

impl Appointment {
    /// Parsed appointment date, if well formed.
    pub fn date(&self) -> Option<NaiveDate> {
        parse_date(&self.appointment_date)
    }

    /// Parsed appointment time, if well formed.
    pub fn time(&self) -> Option<NaiveTime> {
        parse_time(&self.appointment_time)
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).ok()
}

/// Parse an `HH:MM` or `HH:MM:SS` time.
pub fn parse_time(input: &str) -> Option<NaiveTime> {
    let input = input.trim();
    ["%H:%M:%S", "%H:%M"]
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(input, fmt).ok())
}

/// Format a duration in minutes as `{h}h {m}m`.
pub fn format_duration(minutes: Option<i32>) -> String {
    match minutes {
        Some(m) if m > 0 => format!("{}h {}m", m / 60, m % 60),
        _ => "N/A".to_string(),
    }
}

impl Resource for Appointment {
    type Input = AppointmentInput;

    const PATH: &'static str = "appointments";
    const LABEL: &'static str = "Appointment";

    fn id(&self) -> i64 {
        self.id
    }

    fn display_name(&self) -> String {
        format!("{} {}", self.appointment_date, self.appointment_time)
    }

    fn with_id(id: i64, input: AppointmentInput) -> Self {
        Self {
            id,
            customer_id: input.customer_id,
            crew_id: input.crew_id,
            appointment_date: input.appointment_date,
            appointment_time: input.appointment_time,
            estimated_duration: input.estimated_duration,
            origin_address: input.origin_address,
            destination_address: input.destination_address,
            status: input.status,
            notes: input.notes,
            estimated_cost: input.estimated_cost,
            actual_cost: input.actual_cost,
        }
    }

    fn to_input(&self) -> AppointmentInput {
        AppointmentInput {
            customer_id: self.customer_id,
            crew_id: self.crew_id,
            appointment_date: self.appointment_date.clone(),
            appointment_time: self.appointment_time.clone(),
            estimated_duration: self.estimated_duration,
            origin_address: self.origin_address.clone(),
            destination_address: self.destination_address.clone(),
            status: self.status,
            notes: self.notes.clone(),
            estimated_cost: self.estimated_cost,
            actual_cost: self.actual_cost,
        }
    }
}
