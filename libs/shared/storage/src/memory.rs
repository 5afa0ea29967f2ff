use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;
use uuid::Uuid;

use shared_models::domain::{Appointment, BusinessSettings, Provider, Service};

use crate::{ClinicStore, StorageError};

/// In-memory store standing in for a real database. An optional latency
/// is applied to every call to mimic the network round-trip the cells
/// would otherwise pay.
pub struct InMemoryClinicStore {
    settings: RwLock<BusinessSettings>,
    providers: RwLock<Vec<Provider>>,
    services: RwLock<Vec<Service>>,
    appointments: RwLock<HashMap<Uuid, Appointment>>,
    provider_locks: std::sync::Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
    latency: Duration,
}

impl InMemoryClinicStore {
    pub fn new(settings: BusinessSettings, providers: Vec<Provider>, services: Vec<Service>) -> Self {
        Self {
            settings: RwLock::new(settings),
            providers: RwLock::new(providers),
            services: RwLock::new(services),
            appointments: RwLock::new(HashMap::new()),
            provider_locks: std::sync::Mutex::new(HashMap::new()),
            latency: Duration::ZERO,
        }
    }

    pub fn with_latency(mut self, millis: u64) -> Self {
        self.latency = Duration::from_millis(millis);
        self
    }

    async fn simulate_io(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl ClinicStore for InMemoryClinicStore {
    async fn get_service(&self, id: Uuid) -> Result<Option<Service>, StorageError> {
        self.simulate_io().await;
        Ok(self.services.read().await.iter().find(|s| s.id == id).cloned())
    }

    async fn list_providers(&self) -> Result<Vec<Provider>, StorageError> {
        self.simulate_io().await;
        Ok(self.providers.read().await.clone())
    }

    async fn get_provider(&self, id: Uuid) -> Result<Option<Provider>, StorageError> {
        self.simulate_io().await;
        Ok(self.providers.read().await.iter().find(|p| p.id == id).cloned())
    }

    async fn business_settings(&self) -> Result<BusinessSettings, StorageError> {
        self.simulate_io().await;
        Ok(self.settings.read().await.clone())
    }

    async fn list_appointments_for_provider(
        &self,
        provider_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>, StorageError> {
        self.simulate_io().await;
        let appointments = self.appointments.read().await;
        let mut matching: Vec<Appointment> = appointments
            .values()
            .filter(|apt| {
                apt.provider_id == provider_id
                    && apt.status.occupies_calendar()
                    && apt.start_time.date() == date
            })
            .cloned()
            .collect();
        matching.sort_by_key(|apt| apt.start_time);
        Ok(matching)
    }

    async fn get_appointment(&self, id: Uuid) -> Result<Option<Appointment>, StorageError> {
        self.simulate_io().await;
        Ok(self.appointments.read().await.get(&id).cloned())
    }

    async fn insert_appointment(&self, appointment: Appointment) -> Result<(), StorageError> {
        self.simulate_io().await;
        debug!("Inserting appointment {}", appointment.id);
        self.appointments.write().await.insert(appointment.id, appointment);
        Ok(())
    }

    async fn update_appointment(&self, appointment: Appointment) -> Result<(), StorageError> {
        self.simulate_io().await;
        let mut appointments = self.appointments.write().await;
        if !appointments.contains_key(&appointment.id) {
            return Err(StorageError::NotFound(format!(
                "appointment {}",
                appointment.id
            )));
        }
        appointments.insert(appointment.id, appointment);
        Ok(())
    }

    fn provider_lock(&self, provider_id: Uuid) -> Arc<Mutex<()>> {
        let mut locks = self.provider_locks.lock().unwrap();
        locks
            .entry(provider_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
