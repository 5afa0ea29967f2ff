// libs/scheduling-cell/src/services/availability.rs
use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, NaiveTime};
use tracing::debug;
use uuid::Uuid;

use shared_storage::DynClinicStore;

use crate::models::{AvailabilityView, ProviderAvailability, ScheduleError, SlotPolicy, TimeSlot};
use crate::services::{conflict, hours, slots};

/// The availability engine: a pure function of the catalog, roster, and
/// appointment snapshots. Running it twice over an unchanged snapshot
/// returns identical output.
pub struct AvailabilityService {
    store: DynClinicStore,
    policy: SlotPolicy,
}

impl AvailabilityService {
    pub fn new(store: DynClinicStore, policy: SlotPolicy) -> Self {
        Self { store, policy }
    }

    /// Bookable slots for a service on a date, attributed per provider.
    ///
    /// Soft misses degrade to an empty view: an unknown service, no
    /// eligible providers, closed hours, and fully booked calendars all
    /// mean "no availability", never an error.
    pub async fn compute_availability(
        &self,
        service_id: Uuid,
        date: NaiveDate,
    ) -> Result<AvailabilityView, ScheduleError> {
        let Some(service) = self.store.get_service(service_id).await? else {
            debug!("Availability queried for unknown service {}", service_id);
            return Ok(AvailabilityView::empty());
        };

        let settings = self.store.business_settings().await?;
        let providers = self.store.list_providers().await?;

        let mut provider_stats = Vec::new();
        // BTreeMap keeps slot times ascending without a separate sort.
        let mut providers_by_time: BTreeMap<NaiveTime, Vec<Uuid>> = BTreeMap::new();

        for provider in providers
            .iter()
            .filter(|p| p.active && service.provider_ids.contains(&p.id))
        {
            let day = hours::effective_day(provider, &settings, date);
            let windows = hours::open_windows(day);
            if windows.is_empty() {
                provider_stats.push(ProviderAvailability {
                    provider_id: provider.id,
                    slots_count: 0,
                    status: self.policy.bucket(0),
                });
                continue;
            }

            let booked = self
                .store
                .list_appointments_for_provider(provider.id, date)
                .await?;

            let mut surviving = 0usize;
            for (window_start, window_end) in windows {
                for start in slots::candidate_starts(
                    window_start,
                    window_end,
                    service.duration_minutes,
                    self.policy.interval_minutes,
                ) {
                    let candidate_start = date.and_time(start);
                    let candidate_end =
                        candidate_start + Duration::minutes(service.duration_minutes as i64);

                    if conflict::is_free(&booked, candidate_start, candidate_end, None) {
                        surviving += 1;
                        providers_by_time.entry(start).or_default().push(provider.id);
                    }
                }
            }

            provider_stats.push(ProviderAvailability {
                provider_id: provider.id,
                slots_count: surviving,
                status: self.policy.bucket(surviving),
            });
        }

        let slots = providers_by_time
            .into_iter()
            .map(|(time, providers)| TimeSlot {
                time: time.format("%H:%M").to_string(),
                available: true,
                providers,
            })
            .collect();

        debug!(
            "Availability for service {} on {}: {} providers considered",
            service_id,
            date,
            provider_stats.len()
        );

        Ok(AvailabilityView {
            provider_stats,
            slots,
        })
    }
}
