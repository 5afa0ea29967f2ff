// libs/scheduling-cell/src/services/hours.rs
use chrono::{Datelike, NaiveDate, NaiveTime};
use tracing::warn;

use shared_models::domain::{BusinessSettings, Provider, WorkingDay};

/// Effective schedule for a provider on a date: the provider's own hours
/// when they override the clinic, the clinic default otherwise.
pub fn effective_day<'a>(
    provider: &'a Provider,
    settings: &'a BusinessSettings,
    date: NaiveDate,
) -> &'a WorkingDay {
    if provider.override_clinic_hours {
        if let Some(hours) = &provider.working_hours {
            return hours.day(date.weekday());
        }
    }
    settings.working_hours.day(date.weekday())
}

/// Generation windows for one day. A closed day yields nothing; a split
/// day yields both windows so the gap between them is never bookable.
/// A second window that is missing or starts before the first one ends is
/// skipped rather than silently merged.
pub fn open_windows(day: &WorkingDay) -> Vec<(NaiveTime, NaiveTime)> {
    if !day.is_open {
        return Vec::new();
    }

    let mut windows = vec![(day.open, day.close)];

    if day.is_split {
        match (day.open2, day.close2) {
            (Some(open2), Some(close2)) if open2 >= day.close && open2 < close2 => {
                windows.push((open2, close2));
            }
            _ => {
                warn!(
                    "Split day has an invalid second window ({:?}-{:?}), using first window only",
                    day.open2, day.close2
                );
            }
        }
    }

    windows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared_models::domain::{ProviderRole, WorkingHours};
    use uuid::Uuid;

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn week(day: WorkingDay) -> WorkingHours {
        WorkingHours {
            monday: day.clone(),
            tuesday: day.clone(),
            wednesday: day.clone(),
            thursday: day.clone(),
            friday: day.clone(),
            saturday: day.clone(),
            sunday: day,
        }
    }

    fn provider(override_hours: Option<WorkingHours>) -> Provider {
        Provider {
            id: Uuid::new_v4(),
            full_name: "Dr. Test".to_string(),
            role: ProviderRole::Doctor,
            active: true,
            override_clinic_hours: override_hours.is_some(),
            working_hours: override_hours,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn settings() -> BusinessSettings {
        BusinessSettings {
            clinic_name: "Test".to_string(),
            working_hours: week(WorkingDay::open_range(at(9, 0), at(17, 0))),
        }
    }

    #[test]
    fn override_takes_precedence_over_clinic_default() {
        let own = week(WorkingDay::open_range(at(8, 0), at(12, 0)));
        let provider = provider(Some(own));
        let date = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();

        let settings = settings();
        let day = effective_day(&provider, &settings, date);
        assert_eq!(day.open, at(8, 0));
        assert_eq!(day.close, at(12, 0));
    }

    #[test]
    fn clinic_default_applies_without_override() {
        let provider = provider(None);
        let date = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();

        let settings = settings();
        let day = effective_day(&provider, &settings, date);
        assert_eq!(day.open, at(9, 0));
        assert_eq!(day.close, at(17, 0));
    }

    #[test]
    fn split_day_yields_both_windows() {
        let day = WorkingDay::split(at(8, 0), at(12, 0), at(14, 0), at(17, 0));
        let windows = open_windows(&day);
        assert_eq!(windows, vec![(at(8, 0), at(12, 0)), (at(14, 0), at(17, 0))]);
    }

    #[test]
    fn malformed_second_window_is_skipped() {
        let mut day = WorkingDay::split(at(8, 0), at(12, 0), at(11, 0), at(17, 0));
        assert_eq!(open_windows(&day), vec![(at(8, 0), at(12, 0))]);

        day.open2 = None;
        assert_eq!(open_windows(&day), vec![(at(8, 0), at(12, 0))]);
    }

    #[test]
    fn closed_day_yields_nothing() {
        assert!(open_windows(&WorkingDay::closed()).is_empty());
    }
}
