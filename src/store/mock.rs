//! In-memory data source with a seeded sample dataset.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{Duration, NaiveDate};

use crate::error::{AppError, Result};
use crate::models::appointment::DATE_FORMAT;
use crate::models::{
    Appointment, AppointmentStatus, Crew, CrewMember, Customer, Position, Resource,
};

/// All collections held by the mock store.
#[derive(Debug, Clone, Default)]
pub struct MockData {
    pub customers: Vec<Customer>,
    pub crews: Vec<Crew>,
    pub crew_members: Vec<CrewMember>,
    pub appointments: Vec<Appointment>,
}

/// Maps a resource type to its collection in [`MockData`].
pub trait MockTable: Resource {
    fn table(data: &mut MockData) -> &mut Vec<Self>;
}

impl MockTable for Customer {
    fn table(data: &mut MockData) -> &mut Vec<Self> {
        &mut data.customers
    }
}

impl MockTable for Crew {
    fn table(data: &mut MockData) -> &mut Vec<Self> {
        &mut data.crews
    }
}

impl MockTable for CrewMember {
    fn table(data: &mut MockData) -> &mut Vec<Self> {
        &mut data.crew_members
    }
}

impl MockTable for Appointment {
    fn table(data: &mut MockData) -> &mut Vec<Self> {
        &mut data.appointments
    }
}

/// Thread-safe in-memory store.
#[derive(Debug, Default)]
pub struct MockStore {
    data: Mutex<MockData>,
}

impl MockStore {
    pub fn new(data: MockData) -> Self {
        Self { data: Mutex::new(data) }
    }

    /// Store pre-filled with sample records scheduled around `today`.
    pub fn seeded(today: NaiveDate) -> Self {
        Self::new(sample_data(today))
    }

    fn lock(&self) -> MutexGuard<'_, MockData> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn list<R: MockTable>(&self) -> Vec<R> {
        R::table(&mut self.lock()).clone()
    }

    /// Append a record with the next free id.
    pub fn create<R: MockTable>(&self, input: R::Input) -> R {
        let mut data = self.lock();
        let table = R::table(&mut data);
        let id = table.iter().map(Resource::id).max().unwrap_or(0) + 1;
        let record = R::with_id(id, input);
        table.push(record.clone());
        record
    }

    /// Replace the record with the given id in place.
    pub fn update<R: MockTable>(&self, id: i64, input: R::Input) -> Result<R> {
        let mut data = self.lock();
        let slot = R::table(&mut data)
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| AppError::not_found(format!("{} {id}", R::LABEL)))?;
        *slot = R::with_id(id, input);
        Ok(slot.clone())
    }

    /// Remove exactly the record with the given id.
    pub fn delete<R: MockTable>(&self, id: i64) -> Result<()> {
        let mut data = self.lock();
        let table = R::table(&mut data);
        let before = table.len();
        table.retain(|r| r.id() != id);
        if table.len() == before {
            return Err(AppError::not_found(format!("{} {id}", R::LABEL)));
        }
        Ok(())
    }
}

/// Sample dataset used in mock mode.
pub fn sample_data(today: NaiveDate) -> MockData {
    let day = |offset: i64| (today + Duration::days(offset)).format(DATE_FORMAT).to_string();
    let text = |s: &str| Some(s.to_string());

    let customers = vec![
        Customer {
            id: 1,
            name: "John Smith".to_string(),
            phone: text("(555) 123-4567"),
            email: text("john.smith@email.com"),
            address: text("123 Main St, Anytown, ST 12345"),
        },
        Customer {
            id: 2,
            name: "Sarah Johnson".to_string(),
            phone: text("(555) 987-6543"),
            email: text("sarah.j@email.com"),
            address: text("456 Oak Ave, Somewhere, ST 67890"),
        },
        Customer {
            id: 3,
            name: "Mike Davis".to_string(),
            phone: text("(555) 456-7890"),
            email: text("mike.davis@email.com"),
            address: text("789 Pine Rd, Elsewhere, ST 54321"),
        },
    ];

    let crews = vec![
        Crew {
            id: 1,
            name: "Alpha Team".to_string(),
            description: text("Experienced crew for large residential moves"),
            is_active: true,
        },
        Crew {
            id: 2,
            name: "Beta Team".to_string(),
            description: text("Specialized in office relocations"),
            is_active: true,
        },
    ];

    let member = |id, crew_id, name: &str, phone: &str, email: &str, position| CrewMember {
        id,
        crew_id: Some(crew_id),
        name: name.to_string(),
        phone: text(phone),
        email: text(email),
        position: Some(position),
        is_active: true,
    };
    let crew_members = vec![
        member(1, 1, "Tom Wilson", "(555) 111-2222", "tom@movingco.com", Position::TeamLead),
        member(2, 1, "Jerry Brown", "(555) 333-4444", "jerry@movingco.com", Position::Driver),
        member(3, 1, "Lisa Garcia", "(555) 555-6666", "lisa@movingco.com", Position::Helper),
        member(4, 2, "David Lee", "(555) 777-8888", "david@movingco.com", Position::TeamLead),
        member(5, 2, "Anna Martinez", "(555) 999-0000", "anna@movingco.com", Position::Specialist),
    ];

    let appointments = vec![
        Appointment {
            id: 1,
            customer_id: 1,
            crew_id: Some(1),
            appointment_date: day(0),
            appointment_time: "09:00".to_string(),
            estimated_duration: Some(240),
            origin_address: "123 Main St, Anytown, ST 12345".to_string(),
            destination_address: "321 Elm St, Newtown, ST 11111".to_string(),
            status: AppointmentStatus::Scheduled,
            notes: text("3-bedroom house, piano included"),
            estimated_cost: Some(1200.0),
            actual_cost: None,
        },
        Appointment {
            id: 2,
            customer_id: 2,
            crew_id: Some(2),
            appointment_date: day(0),
            appointment_time: "14:00".to_string(),
            estimated_duration: Some(180),
            origin_address: "456 Oak Ave, Somewhere, ST 67890".to_string(),
            destination_address: "654 Maple Dr, Anywhere, ST 22222".to_string(),
            status: AppointmentStatus::InProgress,
            notes: text("Office move, fragile equipment"),
            estimated_cost: Some(800.0),
            actual_cost: None,
        },
        Appointment {
            id: 3,
            customer_id: 3,
            crew_id: None,
            appointment_date: day(2),
            appointment_time: "10:30".to_string(),
            estimated_duration: Some(120),
            origin_address: "789 Pine Rd, Elsewhere, ST 54321".to_string(),
            destination_address: "987 Cedar Ln, Hometown, ST 33333".to_string(),
            status: AppointmentStatus::Scheduled,
            notes: None,
            estimated_cost: Some(600.0),
            actual_cost: None,
        },
        Appointment {
            id: 4,
            customer_id: 1,
            crew_id: Some(1),
            appointment_date: day(-1),
            appointment_time: "08:00".to_string(),
            estimated_duration: Some(300),
            origin_address: "12 Harbor Rd, Bayside, ST 44444".to_string(),
            destination_address: "123 Main St, Anytown, ST 12345".to_string(),
            status: AppointmentStatus::Completed,
            notes: None,
            estimated_cost: Some(1500.0),
            actual_cost: Some(1420.0),
        },
    ];

    MockData {
        customers,
        crews,
        crew_members,
        appointments,
    }
}
