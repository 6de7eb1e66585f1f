//! Form state for the CRUD dialogs.
//!
//! Each form keeps raw text as typed and converts to an input DTO on save,
//! coercing numeric fields and rejecting missing required values.

use std::str::FromStr;

use crate::error::{AppError, Result};
use crate::models::appointment::{DATE_FORMAT, parse_date, parse_time};
use crate::models::{
    Appointment, AppointmentInput, AppointmentStatus, Crew, CrewInput, CrewMember, CrewMemberInput, Customer,
    CustomerInput, Position, non_empty,
};

fn required(value: &str, field: &str) -> Result<String> {
    non_empty(value).ok_or_else(|| AppError::validation(format!("{field} is required")))
}

/// Parse an optional number; blank means `None`.
fn optional_number<T: FromStr>(value: &str, field: &str) -> Result<Option<T>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| AppError::validation(format!("{field} must be a number")))
}

/// Parse an optional amount; blank means `None`, and it must be finite and not negative.
fn optional_cost(value: &str, field: &str) -> Result<Option<f64>> {
    match optional_number::<f64>(value, field)? {
        Some(v) if !v.is_finite() => Err(AppError::validation(format!("{field} must be a number"))),
        Some(v) if v < 0.0 => Err(AppError::validation(format!("{field} cannot be negative"))),
        cost => Ok(cost),
    }
}

fn text_of(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Form state for customer CRUD.
#[derive(Default, Clone)]
pub struct CustomerForm {
    pub id: Option<i64>,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub is_open: bool,
}

impl CustomerForm {
    /// Reset the form to default values.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Open an empty form for a new customer.
    pub fn open_new() -> Self {
        Self {
            is_open: true,
            ..Default::default()
        }
    }

    /// Create a form pre-filled for editing an existing customer.
    pub fn edit(customer: &Customer) -> Self {
        Self {
            id: Some(customer.id),
            name: customer.name.clone(),
            phone: text_of(&customer.phone),
            email: text_of(&customer.email),
            address: text_of(&customer.address),
            is_open: true,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.id.is_some()
    }

    pub fn to_input(&self) -> Result<CustomerInput> {
        Ok(CustomerInput {
            name: required(&self.name, "Name")?,
            phone: non_empty(&self.phone),
            email: non_empty(&self.email),
            address: non_empty(&self.address),
        })
    }
}

/// Form state for crew CRUD.
#[derive(Clone)]
pub struct CrewForm {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub is_active: bool,
    pub is_open: bool,
}

impl Default for CrewForm {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            description: String::new(),
            is_active: true,
            is_open: false,
        }
    }
}

impl CrewForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn open_new() -> Self {
        Self {
            is_open: true,
            ..Default::default()
        }
    }

    pub fn edit(crew: &Crew) -> Self {
        Self {
            id: Some(crew.id),
            name: crew.name.clone(),
            description: text_of(&crew.description),
            is_active: crew.is_active,
            is_open: true,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.id.is_some()
    }

    pub fn to_input(&self) -> Result<CrewInput> {
        Ok(CrewInput {
            name: required(&self.name, "Crew name")?,
            description: non_empty(&self.description),
            is_active: self.is_active,
        })
    }
}

/// Form state for crew member CRUD.
#[derive(Clone)]
pub struct CrewMemberForm {
    pub id: Option<i64>,
    pub crew_id: Option<i64>,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub position: Option<Position>,
    pub is_active: bool,
    pub is_open: bool,
}

impl Default for CrewMemberForm {
    fn default() -> Self {
        Self {
            id: None,
            crew_id: None,
            name: String::new(),
            phone: String::new(),
            email: String::new(),
            position: None,
            is_active: true,
            is_open: false,
        }
    }
}

impl CrewMemberForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn open_new() -> Self {
        Self {
            is_open: true,
            ..Default::default()
        }
    }

    pub fn edit(member: &CrewMember) -> Self {
        Self {
            id: Some(member.id),
            crew_id: member.crew_id,
            name: member.name.clone(),
            phone: text_of(&member.phone),
            email: text_of(&member.email),
            position: member.position,
            is_active: member.is_active,
            is_open: true,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.id.is_some()
    }

    pub fn to_input(&self) -> Result<CrewMemberInput> {
        Ok(CrewMemberInput {
            crew_id: self.crew_id,
            name: required(&self.name, "Name")?,
            phone: non_empty(&self.phone),
            email: non_empty(&self.email),
            position: self.position,
            is_active: self.is_active,
        })
    }
}

/// Form state for appointment CRUD.
#[derive(Default, Clone)]
pub struct AppointmentForm {
    pub id: Option<i64>,
    pub customer_id: Option<i64>,
    pub crew_id: Option<i64>,
    pub appointment_date: String,
    pub appointment_time: String,
    pub estimated_duration: String,
    pub origin_address: String,
    pub destination_address: String,
    pub status: AppointmentStatus,
    pub notes: String,
    pub estimated_cost: String,
    pub actual_cost: String,
    pub is_open: bool,
}

impl AppointmentForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Open an empty form for a new appointment on `date`.
    pub fn open_new(date: chrono::NaiveDate) -> Self {
        Self {
            appointment_date: date.format(DATE_FORMAT).to_string(),
            is_open: true,
            ..Default::default()
        }
    }

    pub fn edit(appointment: &Appointment) -> Self {
        let number = |v: Option<f64>| v.map(|n| n.to_string()).unwrap_or_default();
        Self {
            id: Some(appointment.id),
            customer_id: Some(appointment.customer_id),
            crew_id: appointment.crew_id,
            appointment_date: appointment.appointment_date.clone(),
            appointment_time: appointment.appointment_time.clone(),
            estimated_duration: appointment
                .estimated_duration
                .map(|d| d.to_string())
                .unwrap_or_default(),
            origin_address: appointment.origin_address.clone(),
            destination_address: appointment.destination_address.clone(),
            status: appointment.status,
            notes: text_of(&appointment.notes),
            estimated_cost: number(appointment.estimated_cost),
            actual_cost: number(appointment.actual_cost),
            is_open: true,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.id.is_some()
    }

    /// True when the date field is blank or holds a valid date.
    pub fn date_is_valid(&self) -> bool {
        self.appointment_date.trim().is_empty() || parse_date(&self.appointment_date).is_some()
    }

    /// True when the time field is blank or holds a valid time.
    pub fn time_is_valid(&self) -> bool {
        self.appointment_time.trim().is_empty() || parse_time(&self.appointment_time).is_some()
    }

    pub fn to_input(&self) -> Result<AppointmentInput> {
        let customer_id = self
            .customer_id
            .ok_or_else(|| AppError::validation("Customer is required"))?;

        let appointment_date = required(&self.appointment_date, "Date")?;
        if parse_date(&appointment_date).is_none() {
            return Err(AppError::validation("Date must be in YYYY-MM-DD format"));
        }
        let appointment_time = required(&self.appointment_time, "Time")?;
        if parse_time(&appointment_time).is_none() {
            return Err(AppError::validation("Time must be in HH:MM format"));
        }

        let estimated_duration: Option<i32> = optional_number(&self.estimated_duration, "Duration")?;
        if estimated_duration.is_some_and(|d| d < 0) {
            return Err(AppError::validation("Duration cannot be negative"));
        }

        Ok(AppointmentInput {
            customer_id,
            crew_id: self.crew_id,
            appointment_date,
            appointment_time,
            estimated_duration,
            origin_address: required(&self.origin_address, "Origin address")?,
            destination_address: required(&self.destination_address, "Destination address")?,
            status: self.status,
            notes: non_empty(&self.notes),
            estimated_cost: optional_cost(&self.estimated_cost, "Estimated cost")?,
            actual_cost: optional_cost(&self.actual_cost, "Actual cost")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Resource;
    use chrono::NaiveDate;

    fn filled_appointment() -> AppointmentForm {
        AppointmentForm {
            customer_id: Some(2),
            crew_id: Some(1),
            appointment_date: "2025-07-16".to_string(),
            appointment_time: "09:00".to_string(),
            estimated_duration: " 240 ".to_string(),
            origin_address: "1 Main St".to_string(),
            destination_address: "9 Oak Ave".to_string(),
            estimated_cost: "1200.50".to_string(),
            is_open: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_appointment_numeric_coercion() {
        let input = filled_appointment().to_input().unwrap();

        assert_eq!(input.customer_id, 2);
        assert_eq!(input.crew_id, Some(1));
        assert_eq!(input.estimated_duration, Some(240));
        assert_eq!(input.estimated_cost, Some(1200.5));
        assert_eq!(input.actual_cost, None);
        assert_eq!(input.notes, None);
        assert_eq!(input.status, AppointmentStatus::Scheduled);
    }

    #[test]
    fn test_appointment_rejects_bad_input() {
        let mut form = filled_appointment();
        form.estimated_cost = "lots".to_string();
        assert!(matches!(form.to_input(), Err(AppError::Validation(_))));

        let mut form = filled_appointment();
        form.customer_id = None;
        assert!(form.to_input().is_err());

        let mut form = filled_appointment();
        form.appointment_date = "16/07/2025".to_string();
        assert!(!form.date_is_valid());
        assert!(form.to_input().is_err());

        let mut form = filled_appointment();
        form.appointment_time = "9am".to_string();
        assert!(!form.time_is_valid());
        assert!(form.to_input().is_err());

        let mut form = filled_appointment();
        form.destination_address = "   ".to_string();
        assert!(form.to_input().is_err());

        let mut form = filled_appointment();
        form.estimated_duration = "-5".to_string();
        assert!(form.to_input().is_err());

        for junk in ["NaN", "inf", "-infinity"] {
            let mut form = filled_appointment();
            form.estimated_cost = junk.to_string();
            assert!(matches!(form.to_input(), Err(AppError::Validation(_))), "{junk}");

            let mut form = filled_appointment();
            form.actual_cost = junk.to_string();
            assert!(matches!(form.to_input(), Err(AppError::Validation(_))), "{junk}");
        }

        let mut form = filled_appointment();
        form.actual_cost = "-10".to_string();
        assert!(form.to_input().is_err());
    }

    #[test]
    fn test_appointment_edit_round_trip() {
        let input = filled_appointment().to_input().unwrap();
        let appointment = Appointment::with_id(11, input.clone());

        let form = AppointmentForm::edit(&appointment);
        assert!(form.is_editing());
        assert_eq!(form.estimated_cost, "1200.5");
        assert_eq!(form.to_input().unwrap(), input);
    }

    #[test]
    fn test_open_new_prefills_date() {
        let form = AppointmentForm::open_new(NaiveDate::from_ymd_opt(2025, 7, 16).unwrap());
        assert!(form.is_open);
        assert!(!form.is_editing());
        assert_eq!(form.appointment_date, "2025-07-16");
    }

    #[test]
    fn test_customer_form_blank_fields_are_none() {
        let form = CustomerForm {
            name: "  Ada  ".to_string(),
            phone: " ".to_string(),
            email: "ada@example.com".to_string(),
            ..CustomerForm::open_new()
        };
        let input = form.to_input().unwrap();

        assert_eq!(input.name, "Ada");
        assert_eq!(input.phone, None);
        assert_eq!(input.email.as_deref(), Some("ada@example.com"));

        assert!(CustomerForm::open_new().to_input().is_err());
    }

    #[test]
    fn test_crew_and_member_forms() {
        let crew_form = CrewForm::open_new();
        assert!(crew_form.is_active);
        assert!(crew_form.to_input().is_err());

        let member = CrewMember {
            id: 4,
            crew_id: Some(2),
            name: "David Lee".to_string(),
            phone: None,
            email: Some("david@movingco.com".to_string()),
            position: Some(Position::TeamLead),
            is_active: false,
        };
        let form = CrewMemberForm::edit(&member);
        assert_eq!(form.to_input().unwrap(), member.to_input());

        let mut form = form;
        form.reset();
        assert!(!form.is_open);
        assert!(form.is_active);
        assert_eq!(form.crew_id, None);
    }
}
