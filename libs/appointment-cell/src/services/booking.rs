// libs/appointment-cell/src/services/booking.rs
use chrono::{Duration, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use scheduling_cell::services::conflict;
use shared_models::domain::{
    Appointment, AppointmentStatus, AuditEntry, AuditEvent, Provider,
};
use shared_storage::DynClinicStore;

use crate::models::{
    AppointmentError, CancelAppointmentRequest, CreateAppointmentRequest,
    RescheduleAppointmentRequest,
};
use crate::services::lifecycle::AppointmentLifecycleService;

pub struct AppointmentBookingService {
    store: DynClinicStore,
    lifecycle: AppointmentLifecycleService,
}

impl AppointmentBookingService {
    pub fn new(store: DynClinicStore) -> Self {
        Self {
            store,
            lifecycle: AppointmentLifecycleService::new(),
        }
    }

    /// Book a slot. The conflict scan runs again here, under the
    /// provider's lock, so an offer that went stale between availability
    /// query and commit is rejected instead of double-booked.
    pub async fn create_appointment(
        &self,
        request: CreateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        info!(
            "Booking appointment for patient {} with provider {}",
            request.patient_id, request.provider_id
        );

        let service = self
            .store
            .get_service(request.service_id)
            .await?
            .ok_or(AppointmentError::ServiceNotFound(request.service_id))?;

        let provider = self.eligible_provider(request.provider_id, &service.provider_ids).await?;

        let start_time = request.start_time;
        let end_time = start_time + Duration::minutes(service.duration_minutes as i64);

        let lock = self.store.provider_lock(provider.id);
        let _guard = lock.lock().await;

        let booked = self
            .store
            .list_appointments_for_provider(provider.id, start_time.date())
            .await?;
        if let Some(existing) = conflict::find_conflict(&booked, start_time, end_time, None) {
            warn!(
                "Commit-time conflict for provider {}: requested {} collides with appointment {}",
                provider.id, start_time, existing.id
            );
            return Err(AppointmentError::Conflict {
                provider_id: provider.id,
                start_time,
            });
        }

        let now = Utc::now();
        let appointment = Appointment {
            id: Uuid::new_v4(),
            patient_id: request.patient_id,
            provider_id: provider.id,
            service_id: service.id,
            start_time,
            end_time,
            status: AppointmentStatus::Booked,
            cancellation_reason: None,
            notes: request.notes,
            audit_trail: vec![AuditEntry::now(
                AuditEvent::Created,
                format!("booked {} at {}", service.name, start_time),
            )],
            created_at: now,
            updated_at: now,
        };

        self.store.insert_appointment(appointment.clone()).await?;

        info!("Appointment {} booked with provider {}", appointment.id, provider.id);
        Ok(appointment)
    }

    /// Move an appointment to a new start time, optionally to another
    /// provider. The scan excludes the appointment itself, so shifting a
    /// booking within its own old window is allowed.
    pub async fn reschedule_appointment(
        &self,
        appointment_id: Uuid,
        request: RescheduleAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        debug!("Rescheduling appointment {}", appointment_id);

        let mut appointment = self
            .store
            .get_appointment(appointment_id)
            .await?
            .ok_or(AppointmentError::AppointmentNotFound(appointment_id))?;

        if !self.lifecycle.can_reschedule(appointment.status) {
            return Err(AppointmentError::Validation(format!(
                "appointment in status {} cannot be rescheduled",
                appointment.status
            )));
        }

        let service = self
            .store
            .get_service(appointment.service_id)
            .await?
            .ok_or(AppointmentError::ServiceNotFound(appointment.service_id))?;

        let target_provider_id = request.new_provider_id.unwrap_or(appointment.provider_id);
        let provider = self
            .eligible_provider(target_provider_id, &service.provider_ids)
            .await?;

        let duration = appointment.end_time - appointment.start_time;
        let new_start = request.new_start_time;
        let new_end = new_start + duration;

        let lock = self.store.provider_lock(provider.id);
        let _guard = lock.lock().await;

        let booked = self
            .store
            .list_appointments_for_provider(provider.id, new_start.date())
            .await?;
        if conflict::find_conflict(&booked, new_start, new_end, Some(appointment.id)).is_some() {
            warn!(
                "Reschedule conflict for provider {} at {}",
                provider.id, new_start
            );
            return Err(AppointmentError::Conflict {
                provider_id: provider.id,
                start_time: new_start,
            });
        }

        let detail = format!(
            "moved from {} (provider {}) to {} (provider {}){}",
            appointment.start_time,
            appointment.provider_id,
            new_start,
            provider.id,
            request
                .reason
                .as_deref()
                .map(|r| format!(": {}", r))
                .unwrap_or_default()
        );

        appointment.provider_id = provider.id;
        appointment.start_time = new_start;
        appointment.end_time = new_end;
        appointment.audit_trail.push(AuditEntry::now(AuditEvent::Rescheduled, detail));
        appointment.updated_at = Utc::now();

        self.store.update_appointment(appointment.clone()).await?;

        info!("Appointment {} rescheduled to {}", appointment.id, new_start);
        Ok(appointment)
    }

    /// Cancel an appointment, recording the reason. Cancelled bookings
    /// stop occupying the provider's calendar immediately.
    pub async fn cancel_appointment(
        &self,
        appointment_id: Uuid,
        request: CancelAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        debug!("Cancelling appointment {}", appointment_id);

        let mut appointment = self
            .store
            .get_appointment(appointment_id)
            .await?
            .ok_or(AppointmentError::AppointmentNotFound(appointment_id))?;

        self.lifecycle
            .validate_status_transition(appointment.status, AppointmentStatus::Cancelled)?;

        appointment.status = AppointmentStatus::Cancelled;
        appointment.cancellation_reason = Some(request.reason.clone());
        appointment
            .audit_trail
            .push(AuditEntry::now(AuditEvent::Cancelled, request.reason));
        appointment.updated_at = Utc::now();

        self.store.update_appointment(appointment.clone()).await?;

        info!("Appointment {} cancelled", appointment.id);
        Ok(appointment)
    }

    pub async fn update_status(
        &self,
        appointment_id: Uuid,
        new_status: AppointmentStatus,
    ) -> Result<Appointment, AppointmentError> {
        let mut appointment = self
            .store
            .get_appointment(appointment_id)
            .await?
            .ok_or(AppointmentError::AppointmentNotFound(appointment_id))?;

        self.lifecycle
            .validate_status_transition(appointment.status, new_status)?;

        let detail = format!("{} -> {}", appointment.status, new_status);
        appointment.status = new_status;
        appointment
            .audit_trail
            .push(AuditEntry::now(AuditEvent::StatusChanged, detail));
        appointment.updated_at = Utc::now();

        self.store.update_appointment(appointment.clone()).await?;
        Ok(appointment)
    }

    pub async fn get_appointment(
        &self,
        appointment_id: Uuid,
    ) -> Result<Appointment, AppointmentError> {
        self.store
            .get_appointment(appointment_id)
            .await?
            .ok_or(AppointmentError::AppointmentNotFound(appointment_id))
    }

    async fn eligible_provider(
        &self,
        provider_id: Uuid,
        credentialed: &[Uuid],
    ) -> Result<Provider, AppointmentError> {
        let provider = self
            .store
            .get_provider(provider_id)
            .await?
            .ok_or(AppointmentError::ProviderNotFound(provider_id))?;

        if !provider.active || !credentialed.contains(&provider.id) {
            return Err(AppointmentError::ProviderNotEligible(provider.id));
        }

        Ok(provider)
    }
}
