// libs/scheduling-cell/src/services/clock.rs
//
// Minute-granular time arithmetic. All values are wall-clock local; no
// time-zone conversion happens anywhere in the engine.

use chrono::NaiveTime;

use crate::models::ScheduleError;

/// Parse a zero-padded 24-hour "HH:MM" string. Anything else is rejected
/// loudly rather than silently misparsed into a wrong slot grid.
pub fn parse_hhmm(value: &str) -> Result<NaiveTime, ScheduleError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| ScheduleError::Format(format!("expected HH:MM, got '{}'", value)))
}

pub fn minutes_since_midnight(time: NaiveTime) -> u32 {
    use chrono::Timelike;
    time.hour() * 60 + time.minute()
}

pub fn time_from_minutes(minutes: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).unwrap()
}

/// Half-open interval intersection: touching intervals do not overlap.
pub fn overlaps<T: PartialOrd>(a_start: T, a_end: T, b_start: T, b_end: T) -> bool {
    a_start < b_end && b_start < a_end
}
