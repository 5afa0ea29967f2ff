// libs/scheduling-cell/src/services/conflict.rs
use chrono::NaiveDateTime;
use uuid::Uuid;

use shared_models::domain::Appointment;

use crate::services::clock::overlaps;

/// Whether a proposed `[start, end)` is free on a provider's calendar.
/// Cancelled appointments never block; `exclude` lets a reschedule ignore
/// the appointment being moved.
pub fn is_free(
    existing: &[Appointment],
    start: NaiveDateTime,
    end: NaiveDateTime,
    exclude: Option<Uuid>,
) -> bool {
    !existing.iter().any(|apt| {
        exclude != Some(apt.id)
            && apt.status.occupies_calendar()
            && overlaps(start, end, apt.start_time, apt.end_time)
    })
}

/// The first appointment colliding with `[start, end)`, for error detail.
pub fn find_conflict<'a>(
    existing: &'a [Appointment],
    start: NaiveDateTime,
    end: NaiveDateTime,
    exclude: Option<Uuid>,
) -> Option<&'a Appointment> {
    existing.iter().find(|apt| {
        exclude != Some(apt.id)
            && apt.status.occupies_calendar()
            && overlaps(start, end, apt.start_time, apt.end_time)
    })
}
