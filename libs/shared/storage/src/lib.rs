pub mod memory;
pub mod seed;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::domain::{Appointment, BusinessSettings, Provider, Service};

pub use memory::InMemoryClinicStore;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Storage failure: {0}")]
    Internal(String),
}

/// Read/write boundary between the cells and whatever holds the clinic
/// data. The availability engine only uses the read side; the booking
/// service additionally takes the per-provider lock around its
/// check-and-insert.
#[async_trait]
pub trait ClinicStore: Send + Sync {
    async fn get_service(&self, id: Uuid) -> Result<Option<Service>, StorageError>;

    async fn list_providers(&self) -> Result<Vec<Provider>, StorageError>;

    async fn get_provider(&self, id: Uuid) -> Result<Option<Provider>, StorageError>;

    async fn business_settings(&self) -> Result<BusinessSettings, StorageError>;

    /// Non-cancelled appointments for one provider on one calendar date.
    async fn list_appointments_for_provider(
        &self,
        provider_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>, StorageError>;

    async fn get_appointment(&self, id: Uuid) -> Result<Option<Appointment>, StorageError>;

    async fn insert_appointment(&self, appointment: Appointment) -> Result<(), StorageError>;

    async fn update_appointment(&self, appointment: Appointment) -> Result<(), StorageError>;

    /// Exclusive lock for one provider's calendar. Held across conflict
    /// re-validation plus insert so two concurrent bookings cannot both
    /// commit the same slot.
    fn provider_lock(&self, provider_id: Uuid) -> Arc<Mutex<()>>;
}

pub type DynClinicStore = Arc<dyn ClinicStore>;

/// Shared application state handed to every cell router.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: DynClinicStore,
}
