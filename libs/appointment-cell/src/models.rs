// libs/appointment-cell/src/models.rs
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use shared_models::domain::AppointmentStatus;
use shared_models::error::AppError;
use shared_storage::StorageError;

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub patient_id: Uuid,
    pub provider_id: Uuid,
    pub service_id: Uuid,
    pub start_time: NaiveDateTime,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RescheduleAppointmentRequest {
    pub new_start_time: NaiveDateTime,
    /// A reschedule may hand the booking to a different provider.
    pub new_provider_id: Option<Uuid>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelAppointmentRequest {
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: AppointmentStatus,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug)]
pub enum AppointmentError {
    #[error("Service not found: {0}")]
    ServiceNotFound(Uuid),

    #[error("Provider not found: {0}")]
    ProviderNotFound(Uuid),

    #[error("Appointment not found: {0}")]
    AppointmentNotFound(Uuid),

    #[error("Provider {0} is not eligible for this service")]
    ProviderNotEligible(Uuid),

    #[error("Slot conflict: provider {provider_id} is already booked at {start_time}")]
    Conflict {
        provider_id: Uuid,
        start_time: NaiveDateTime,
    },

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<StorageError> for AppointmentError {
    fn from(err: StorageError) -> Self {
        AppointmentError::Storage(err.to_string())
    }
}

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        match &err {
            AppointmentError::ServiceNotFound(_)
            | AppointmentError::ProviderNotFound(_)
            | AppointmentError::AppointmentNotFound(_) => AppError::NotFound(err.to_string()),
            AppointmentError::Conflict { .. } => AppError::Conflict(err.to_string()),
            AppointmentError::InvalidStatusTransition { .. }
            | AppointmentError::ProviderNotEligible(_)
            | AppointmentError::Validation(_) => AppError::Validation(err.to_string()),
            AppointmentError::Storage(_) => AppError::Internal(err.to_string()),
        }
    }
}
