// libs/scheduling-cell/src/services/slots.rs
use chrono::NaiveTime;

use crate::services::clock;

/// Candidate start times across one working window, stepped at the slot
/// interval. The step is independent of the service duration: slots are a
/// start-time grid, not back-to-back packing. A candidate is emitted only
/// while its whole duration fits inside the window.
pub fn candidate_starts(
    window_start: NaiveTime,
    window_end: NaiveTime,
    duration_minutes: u32,
    step_minutes: u32,
) -> Vec<NaiveTime> {
    let mut starts = Vec::new();
    if step_minutes == 0 || duration_minutes == 0 {
        return starts;
    }

    let window_end = clock::minutes_since_midnight(window_end);
    let mut t = clock::minutes_since_midnight(window_start);
    while t + duration_minutes <= window_end {
        starts.push(clock::time_from_minutes(t));
        t += step_minutes;
    }

    starts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn stops_before_candidate_end_exceeds_window() {
        // 09:00-10:00 with a 30 minute service: 10:00 itself would end at
        // 10:30, outside the window.
        let starts = candidate_starts(at(9, 0), at(10, 0), 30, 30);
        assert_eq!(starts, vec![at(9, 0), at(9, 30)]);
    }

    #[test]
    fn duration_longer_than_step_still_walks_the_grid() {
        // 45 minute service on a 30 minute grid: starts may be closer
        // together than the duration.
        let starts = candidate_starts(at(9, 0), at(11, 0), 45, 30);
        assert_eq!(starts, vec![at(9, 0), at(9, 30), at(10, 0)]);
    }

    #[test]
    fn window_shorter_than_duration_yields_nothing() {
        assert!(candidate_starts(at(9, 0), at(9, 20), 30, 30).is_empty());
    }

    #[test]
    fn exact_fit_emits_single_candidate() {
        assert_eq!(candidate_starts(at(9, 0), at(9, 30), 30, 30), vec![at(9, 0)]);
    }
}
