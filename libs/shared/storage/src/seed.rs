//! Fixture data for the demo binary and for tests. The roster mirrors a
//! small clinic: two doctors, one nurse, and a catalog where one service
//! is restricted to a single credentialed provider.

use chrono::{NaiveTime, Utc};
use uuid::Uuid;

use shared_models::domain::{
    BusinessSettings, Provider, ProviderRole, Service, WorkingDay, WorkingHours,
};

use crate::InMemoryClinicStore;

pub fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

/// Same window every day of the week.
pub fn uniform_week(day: WorkingDay) -> WorkingHours {
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

/// Mon-Fri 09:00-17:00, Sat 09:00-13:00, closed Sunday.
pub fn standard_hours() -> WorkingHours {
    let weekday = WorkingDay::open_range(at(9, 0), at(17, 0));
    WorkingHours {
        monday: weekday.clone(),
        tuesday: weekday.clone(),
        wednesday: weekday.clone(),
        thursday: weekday.clone(),
        friday: weekday,
        saturday: WorkingDay::open_range(at(9, 0), at(13, 0)),
        sunday: WorkingDay::closed(),
    }
}

pub fn provider(name: &str, role: ProviderRole, override_hours: Option<WorkingHours>) -> Provider {
    Provider {
        id: Uuid::new_v4(),
        full_name: name.to_string(),
        role,
        active: true,
        override_clinic_hours: override_hours.is_some(),
        working_hours: override_hours,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn service(name: &str, duration_minutes: u32, provider_ids: Vec<Uuid>) -> Service {
    Service {
        id: Uuid::new_v4(),
        name: name.to_string(),
        duration_minutes,
        provider_ids,
    }
}

pub fn demo_store() -> InMemoryClinicStore {
    let settings = BusinessSettings {
        clinic_name: "Lakeside Family Clinic".to_string(),
        working_hours: standard_hours(),
    };

    // Second doctor works reduced hours through a personal override.
    let dr_okafor = provider("Dr. Amara Okafor", ProviderRole::Doctor, None);
    let dr_lindqvist = provider(
        "Dr. Elsa Lindqvist",
        ProviderRole::Doctor,
        Some(uniform_week(WorkingDay::open_range(at(8, 0), at(12, 0)))),
    );
    let nurse_reyes = provider("Nurse Mateo Reyes", ProviderRole::Nurse, None);

    let consultation = service(
        "General Consultation",
        30,
        vec![dr_okafor.id, dr_lindqvist.id],
    );
    let pediatric = service("Pediatric Checkup", 45, vec![dr_lindqvist.id]);
    let vaccination = service("Vaccination", 15, vec![nurse_reyes.id]);

    InMemoryClinicStore::new(
        settings,
        vec![dr_okafor, dr_lindqvist, nurse_reyes],
        vec![consultation, pediatric, vaccination],
    )
}
