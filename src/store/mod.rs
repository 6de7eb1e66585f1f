//! Data access: one repository over either the REST API or the mock store.

pub mod mock;

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tracing::debug;

use crate::client::ApiClient;
use crate::config::AppConfig;
use crate::error::Result;
use crate::models::{Appointment, AppointmentStatus, Resource};

pub use mock::{MockData, MockStore, MockTable};

/// Cloneable handle to the active data source.
#[derive(Clone)]
pub enum Repository {
    Rest(ApiClient),
    Mock(Arc<MockStore>),
}

impl Repository {
    /// Build the repository selected by configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        if config.data.mock {
            Ok(Self::mock(MockStore::seeded(Local::now().date_naive())))
        } else {
            let client = ApiClient::new(&config.api.base_url, Duration::from_secs(config.api.timeout_secs))?;
            Ok(Self::Rest(client))
        }
    }

    pub fn mock(store: MockStore) -> Self {
        Self::Mock(Arc::new(store))
    }

    pub fn is_mock(&self) -> bool {
        matches!(self, Repository::Mock(_))
    }

    /// Human readable description of the data source.
    pub fn describe(&self) -> String {
        match self {
            Repository::Rest(client) => client.base_url().to_string(),
            Repository::Mock(_) => "Sample data (mock mode)".to_string(),
        }
    }

    /// Fetch the full collection of `R`.
    pub async fn list<R: MockTable>(&self) -> Result<Vec<R>> {
        match self {
            Repository::Rest(client) => client.list::<R>().await,
            Repository::Mock(store) => Ok(store.list::<R>()),
        }
    }

    pub async fn create<R: MockTable>(&self, input: R::Input) -> Result<R> {
        debug!("create {}", R::LABEL);
        match self {
            Repository::Rest(client) => client.create::<R>(&input).await,
            Repository::Mock(store) => Ok(store.create::<R>(input)),
        }
    }

    pub async fn update<R: MockTable>(&self, id: i64, input: R::Input) -> Result<R> {
        debug!("update {} {id}", R::LABEL);
        match self {
            Repository::Rest(client) => client.update::<R>(id, &input).await,
            Repository::Mock(store) => store.update::<R>(id, input),
        }
    }

    pub async fn delete<R: MockTable>(&self, id: i64) -> Result<()> {
        debug!("delete {} {id}", R::LABEL);
        match self {
            Repository::Rest(client) => client.delete::<R>(id).await,
            Repository::Mock(store) => store.delete::<R>(id),
        }
    }

    /// Re-send the full appointment with only its status changed.
    pub async fn update_status(&self, appointment: &Appointment, status: AppointmentStatus) -> Result<Appointment> {
        let mut input = appointment.to_input();
        input.status = status;
        self.update::<Appointment>(appointment.id, input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{
        AppointmentInput, Crew, CrewInput, CrewMember, CrewMemberInput, Customer, CustomerInput, Position,
    };
    use chrono::NaiveDate;

    fn repo() -> Repository {
        Repository::mock(MockStore::seeded(NaiveDate::from_ymd_opt(2025, 7, 16).unwrap()))
    }

    #[tokio::test]
    async fn test_created_customer_round_trips() {
        let repo = repo();
        let input = CustomerInput {
            name: "Grace Hopper".to_string(),
            phone: Some("(555) 010-1010".to_string()),
            email: Some("grace@example.com".to_string()),
            address: Some("1 Navy Way".to_string()),
        };

        let created: Customer = repo.create(input.clone()).await.unwrap();
        let listed: Vec<Customer> = repo.list().await.unwrap();
        let found = listed.iter().find(|c| c.id == created.id).unwrap();

        assert_eq!(found.to_input(), input);
    }

    #[tokio::test]
    async fn test_updated_member_round_trips() {
        let repo = repo();
        let input = CrewMemberInput {
            crew_id: Some(2),
            name: "Tom Wilson".to_string(),
            phone: None,
            email: Some("tom@movingco.com".to_string()),
            position: Some(Position::Driver),
            is_active: false,
        };

        repo.update::<CrewMember>(1, input.clone()).await.unwrap();
        let listed: Vec<CrewMember> = repo.list().await.unwrap();

        assert_eq!(listed.iter().find(|m| m.id == 1).unwrap().to_input(), input);
    }

    #[tokio::test]
    async fn test_delete_removes_only_target() {
        let repo = repo();
        let before: Vec<Appointment> = repo.list().await.unwrap();

        repo.delete::<Appointment>(2).await.unwrap();
        let after: Vec<Appointment> = repo.list().await.unwrap();

        let expected: Vec<Appointment> = before.into_iter().filter(|a| a.id != 2).collect();
        assert_eq!(after, expected);
    }

    #[tokio::test]
    async fn test_delete_crew_leaves_others() {
        let repo = repo();
        repo.create::<Crew>(CrewInput {
            name: "Gamma Team".to_string(),
            description: None,
            is_active: true,
        })
        .await
        .unwrap();

        repo.delete::<Crew>(1).await.unwrap();
        let names: Vec<String> = repo.list::<Crew>().await.unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Beta Team".to_string(), "Gamma Team".to_string()]);
    }

    #[tokio::test]
    async fn test_status_update_changes_only_status() {
        let repo = repo();
        let original = repo.list::<Appointment>().await.unwrap().remove(0);

        let updated = repo
            .update_status(&original, AppointmentStatus::Cancelled)
            .await
            .unwrap();

        assert_eq!(updated.status, AppointmentStatus::Cancelled);
        let restored = Appointment {
            status: original.status,
            ..updated.clone()
        };
        assert_eq!(restored, original);

        let listed = repo.list::<Appointment>().await.unwrap();
        assert_eq!(listed[0], updated);
    }

    #[tokio::test]
    async fn test_update_missing_appointment_fails() {
        let repo = repo();
        let input = AppointmentInput {
            customer_id: 1,
            crew_id: None,
            appointment_date: "2025-08-01".to_string(),
            appointment_time: "09:00".to_string(),
            estimated_duration: None,
            origin_address: "A".to_string(),
            destination_address: "B".to_string(),
            status: AppointmentStatus::Scheduled,
            notes: None,
            estimated_cost: None,
            actual_cost: None,
        };

        let err = repo.update::<Appointment>(42, input).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_from_config_selects_source() {
        let mut config = AppConfig::default();
        config.api.base_url = "http://api.local:9000/".to_string();
        let rest = Repository::from_config(&config).unwrap();
        assert!(!rest.is_mock());
        assert_eq!(rest.describe(), "http://api.local:9000");

        config.data.mock = true;
        assert!(Repository::from_config(&config).unwrap().is_mock());
    }
}
