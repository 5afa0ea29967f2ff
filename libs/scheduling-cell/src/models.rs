// libs/scheduling-cell/src/models.rs
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_storage::StorageError;

/// Bucketed summary of one provider's capacity on the queried date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AvailabilityStatus {
    Available,
    Limited,
    Off,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderAvailability {
    pub provider_id: Uuid,
    pub slots_count: usize,
    pub status: AvailabilityStatus,
}

/// One bookable start time and the providers free to take it. A time with
/// no free provider is never emitted, so `available` is always true today;
/// it is kept for consumers that want to signal soft-held slots later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub time: String,
    pub available: bool,
    pub providers: Vec<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityView {
    pub provider_stats: Vec<ProviderAvailability>,
    pub slots: Vec<TimeSlot>,
}

impl AvailabilityView {
    /// "No availability" is a valid result, not an error.
    pub fn empty() -> Self {
        Self {
            provider_stats: Vec::new(),
            slots: Vec::new(),
        }
    }
}

/// Quantization and bucketing policy. The defaults are the clinic's
/// long-standing behavior; changing them changes what every booking
/// surface offers.
#[derive(Debug, Clone, Copy)]
pub struct SlotPolicy {
    pub interval_minutes: u32,
    pub limited_threshold: usize,
}

impl SlotPolicy {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            interval_minutes: config.slot_interval_minutes,
            limited_threshold: config.limited_slot_threshold,
        }
    }

    pub fn bucket(&self, slots_count: usize) -> AvailabilityStatus {
        if slots_count == 0 {
            AvailabilityStatus::Off
        } else if slots_count <= self.limited_threshold {
            AvailabilityStatus::Limited
        } else {
            AvailabilityStatus::Available
        }
    }
}

impl Default for SlotPolicy {
    fn default() -> Self {
        Self {
            interval_minutes: 30,
            limited_threshold: 5,
        }
    }
}

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Invalid time format: {0}")]
    Format(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<StorageError> for ScheduleError {
    fn from(err: StorageError) -> Self {
        ScheduleError::Storage(err.to_string())
    }
}

impl From<ScheduleError> for shared_models::AppError {
    fn from(err: ScheduleError) -> Self {
        match err {
            ScheduleError::Format(msg) => shared_models::AppError::BadRequest(msg),
            ScheduleError::Storage(msg) => shared_models::AppError::Internal(msg),
        }
    }
}
