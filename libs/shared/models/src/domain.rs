use chrono::{DateTime, NaiveDateTime, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ==============================================================================
// WORKING HOURS
// ==============================================================================

/// One day's bookable window. A split day carries a second, later window;
/// the gap between the two is never bookable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkingDay {
    pub open: NaiveTime,
    pub close: NaiveTime,
    pub is_open: bool,
    #[serde(default)]
    pub is_split: bool,
    #[serde(default)]
    pub open2: Option<NaiveTime>,
    #[serde(default)]
    pub close2: Option<NaiveTime>,
}

impl WorkingDay {
    pub fn open_range(open: NaiveTime, close: NaiveTime) -> Self {
        Self {
            open,
            close,
            is_open: true,
            is_split: false,
            open2: None,
            close2: None,
        }
    }

    pub fn split(open: NaiveTime, close: NaiveTime, open2: NaiveTime, close2: NaiveTime) -> Self {
        Self {
            open,
            close,
            is_open: true,
            is_split: true,
            open2: Some(open2),
            close2: Some(close2),
        }
    }

    pub fn closed() -> Self {
        Self {
            open: NaiveTime::MIN,
            close: NaiveTime::MIN,
            is_open: false,
            is_split: false,
            open2: None,
            close2: None,
        }
    }
}

/// Weekly schedule, owned either by the clinic settings or by a provider
/// whose hours override the clinic default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub monday: WorkingDay,
    pub tuesday: WorkingDay,
    pub wednesday: WorkingDay,
    pub thursday: WorkingDay,
    pub friday: WorkingDay,
    pub saturday: WorkingDay,
    pub sunday: WorkingDay,
}

impl WorkingHours {
    pub fn day(&self, weekday: Weekday) -> &WorkingDay {
        match weekday {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        }
    }

    pub fn day_mut(&mut self, weekday: Weekday) -> &mut WorkingDay {
        match weekday {
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
            Weekday::Sun => &mut self.sunday,
        }
    }
}

/// Clinic-wide defaults that apply to every provider without an override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessSettings {
    pub clinic_name: String,
    pub working_hours: WorkingHours,
}

// ==============================================================================
// ROSTER AND CATALOG
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderRole {
    Doctor,
    Nurse,
    Therapist,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id: Uuid,
    pub full_name: String,
    pub role: ProviderRole,
    /// Inactive providers are never considered for scheduling.
    pub active: bool,
    /// When true and `working_hours` is set, the provider's own schedule
    /// replaces the clinic default.
    pub override_clinic_hours: bool,
    pub working_hours: Option<WorkingHours>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Booking catalog entry. `provider_ids` is the set of providers
/// credentialed to perform this service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    pub duration_minutes: u32,
    pub provider_ids: Vec<Uuid>,
}

// ==============================================================================
// APPOINTMENTS
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Pending,
    Booked,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
    Rescheduled,
}

impl AppointmentStatus {
    /// Whether an appointment in this status blocks its provider's calendar.
    pub fn occupies_calendar(&self) -> bool {
        !matches!(self, AppointmentStatus::Cancelled)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "PENDING"),
            AppointmentStatus::Booked => write!(f, "BOOKED"),
            AppointmentStatus::Confirmed => write!(f, "CONFIRMED"),
            AppointmentStatus::Completed => write!(f, "COMPLETED"),
            AppointmentStatus::Cancelled => write!(f, "CANCELLED"),
            AppointmentStatus::NoShow => write!(f, "NO_SHOW"),
            AppointmentStatus::Rescheduled => write!(f, "RESCHEDULED"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEvent {
    Created,
    StatusChanged,
    Rescheduled,
    Cancelled,
}

/// One line of an appointment's append-only history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub at: DateTime<Utc>,
    pub event: AuditEvent,
    pub detail: String,
}

impl AuditEntry {
    pub fn now(event: AuditEvent, detail: impl Into<String>) -> Self {
        Self {
            at: Utc::now(),
            event,
            detail: detail.into(),
        }
    }
}

/// A committed booking. Times are wall-clock local; the end is stored
/// explicitly rather than derived at query time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub provider_id: Uuid,
    pub service_id: Uuid,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub status: AppointmentStatus,
    pub cancellation_reason: Option<String>,
    pub notes: Option<String>,
    pub audit_trail: Vec<AuditEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
