//! Dashboard aggregation over the loaded collections.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::error::Result;
use crate::models::appointment::DATE_FORMAT;
use crate::models::{Appointment, AppointmentStatus, Crew, Customer, find_by_id};
use crate::store::Repository;

/// Default number of upcoming appointments shown.
pub const UPCOMING_LIMIT: usize = 5;

/// Aggregate figures shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardStats {
    pub total_appointments: usize,
    pub today_appointments: usize,
    pub total_customers: usize,
    pub total_crews: usize,
    pub upcoming: Vec<UpcomingAppointment>,
}

/// Row in the upcoming appointments list.
#[derive(Debug, Clone, PartialEq)]
pub struct UpcomingAppointment {
    pub id: i64,
    pub customer: String,
    pub date: String,
    pub time: String,
    pub status: AppointmentStatus,
    pub origin: String,
    pub destination: String,
}

impl DashboardStats {
    /// Derive all figures from scratch.
    pub fn compute(
        appointments: &[Appointment],
        customers: &[Customer],
        crews: &[Crew],
        today: NaiveDate,
        limit: usize,
    ) -> Self {
        Self {
            total_appointments: appointments.len(),
            today_appointments: count_today(appointments, today),
            total_customers: customers.len(),
            total_crews: crews.len(),
            upcoming: upcoming(appointments, customers, today, limit),
        }
    }
}

/// Appointments whose date string equals today's `YYYY-MM-DD` exactly.
pub fn count_today(appointments: &[Appointment], today: NaiveDate) -> usize {
    let today = today.format(DATE_FORMAT).to_string();
    appointments.iter().filter(|a| a.appointment_date == today).count()
}

/// Appointments on or after `today`, soonest first, at most `limit`.
pub fn upcoming(
    appointments: &[Appointment],
    customers: &[Customer],
    today: NaiveDate,
    limit: usize,
) -> Vec<UpcomingAppointment> {
    let mut dated: Vec<(NaiveDate, &Appointment)> = appointments
        .iter()
        .filter_map(|a| a.date().map(|d| (d, a)))
        .filter(|(d, _)| *d >= today)
        .collect();

    dated.sort_by(|(da, a), (db, b)| da.cmp(db).then_with(|| compare_times(a, b)));

    dated
        .into_iter()
        .take(limit)
        .map(|(_, a)| UpcomingAppointment {
            id: a.id,
            customer: find_by_id(customers, a.customer_id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| "N/A".to_string()),
            date: a.appointment_date.clone(),
            time: a.appointment_time.clone(),
            status: a.status,
            origin: a.origin_address.clone(),
            destination: a.destination_address.clone(),
        })
        .collect()
}

// Unparseable times go last, ordered by their raw text.
fn compare_times(a: &Appointment, b: &Appointment) -> Ordering {
    match (a.time(), b.time()) {
        (Some(ta), Some(tb)) => ta.cmp(&tb),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.appointment_time.cmp(&b.appointment_time),
    }
}

/// Fetch the three collections concurrently and aggregate them.
///
/// Any failing fetch aborts the whole aggregation.
pub async fn load(repo: &Repository, today: NaiveDate, limit: usize) -> Result<DashboardStats> {
    let (appointments, customers, crews) = tokio::try_join!(
        repo.list::<Appointment>(),
        repo.list::<Customer>(),
        repo.list::<Crew>()
    )?;

    Ok(DashboardStats::compute(&appointments, &customers, &crews, today, limit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ApiClient;
    use crate::error::ErrorKind;
    use crate::store::MockStore;

    fn appt(id: i64, customer_id: i64, date: &str, time: &str) -> Appointment {
        Appointment {
            id,
            customer_id,
            crew_id: None,
            appointment_date: date.to_string(),
            appointment_time: time.to_string(),
            estimated_duration: None,
            origin_address: format!("Origin {id}"),
            destination_address: format!("Destination {id}"),
            status: AppointmentStatus::Scheduled,
            notes: None,
            estimated_cost: None,
            actual_cost: None,
        }
    }

    fn customer(id: i64, name: &str) -> Customer {
        Customer {
            id,
            name: name.to_string(),
            phone: None,
            email: None,
            address: None,
        }
    }

    fn july(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, day).unwrap()
    }

    #[test]
    fn test_today_and_upcoming_example() {
        let appointments = vec![
            appt(1, 1, "2025-07-16", "14:00"),
            appt(2, 2, "2025-07-15", "10:30"),
            appt(3, 1, "2025-07-16", "09:00"),
        ];
        let customers = vec![customer(1, "Ada"), customer(2, "Bo")];

        let stats = DashboardStats::compute(&appointments, &customers, &[], july(16), UPCOMING_LIMIT);

        assert_eq!(stats.total_appointments, 3);
        assert_eq!(stats.today_appointments, 2);
        assert_eq!(stats.total_customers, 2);
        assert_eq!(stats.total_crews, 0);
        let ids: Vec<i64> = stats.upcoming.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(stats.upcoming[0].customer, "Ada");
        assert_eq!(stats.upcoming[0].time, "09:00");
    }

    #[test]
    fn test_today_count_is_exact_string_match() {
        let appointments = vec![
            appt(1, 1, "2025-07-16", "09:00"),
            appt(2, 1, "2025-7-16", "09:00"),
            appt(3, 1, " 2025-07-16", "09:00"),
        ];
        assert_eq!(count_today(&appointments, july(16)), 1);
    }

    #[test]
    fn test_upcoming_sorted_and_truncated() {
        let appointments = vec![
            appt(1, 1, "2025-07-20", "08:00"),
            appt(2, 1, "2025-07-17", "16:00"),
            appt(3, 1, "2025-07-17", "07:30:00"),
            appt(4, 1, "2025-07-18", "12:00"),
            appt(5, 1, "2025-07-16", "23:59"),
            appt(6, 1, "2025-07-19", "10:00"),
            appt(7, 1, "2025-07-21", "10:00"),
            appt(8, 1, "not a date", "10:00"),
        ];

        let list = upcoming(&appointments, &[], july(16), UPCOMING_LIMIT);

        assert_eq!(list.len(), 5);
        let ids: Vec<i64> = list.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![5, 3, 2, 4, 6]);
        assert!(list.windows(2).all(|w| w[0].date <= w[1].date));
        assert!(list.iter().all(|u| u.customer == "N/A"));
    }

    #[test]
    fn test_unparseable_time_sorts_last_within_day() {
        let appointments = vec![
            appt(1, 1, "2025-07-17", "afternoon"),
            appt(2, 1, "2025-07-17", "11:00"),
            appt(3, 1, "2025-07-17", "09:15"),
        ];

        let ids: Vec<i64> = upcoming(&appointments, &[], july(16), 10).iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn test_load_fails_when_any_fetch_fails() {
        // Bind then drop to get a port nobody listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = ApiClient::new(&format!("http://{addr}"), std::time::Duration::from_secs(2)).unwrap();
        let repo = Repository::Rest(client);

        let err = load(&repo, july(16), UPCOMING_LIMIT).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
    }

    #[tokio::test]
    async fn test_load_from_mock_store() {
        let repo = Repository::mock(MockStore::seeded(july(16)));

        let stats = load(&repo, july(16), UPCOMING_LIMIT).await.unwrap();

        assert_eq!(stats.total_appointments, 4);
        assert_eq!(stats.today_appointments, 2);
        assert_eq!(stats.total_customers, 3);
        assert_eq!(stats.total_crews, 2);
        // Yesterday's completed move is not upcoming.
        assert_eq!(stats.upcoming.len(), 3);
        assert_eq!(stats.upcoming[0].customer, "John Smith");
        assert_eq!(stats.upcoming[1].time, "14:00");
    }
}
