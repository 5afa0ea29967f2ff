use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

use appointment_cell::models::{
    AppointmentError, CancelAppointmentRequest, CreateAppointmentRequest,
    RescheduleAppointmentRequest,
};
use appointment_cell::services::AppointmentBookingService;
use shared_models::domain::{
    AppointmentStatus, AuditEvent, BusinessSettings, Provider, ProviderRole, Service,
};
use shared_storage::{seed, DynClinicStore, InMemoryClinicStore};

struct Fixture {
    booking: AppointmentBookingService,
    provider: Provider,
    second_provider: Provider,
    nurse: Provider,
    service: Service,
}

fn fixture() -> Fixture {
    let provider = seed::provider("Dr. Amara Okafor", ProviderRole::Doctor, None);
    let second_provider = seed::provider("Dr. Elsa Lindqvist", ProviderRole::Doctor, None);
    // In the roster, but not credentialed for the consultation service.
    let nurse = seed::provider("Nurse Mateo Reyes", ProviderRole::Nurse, None);
    let service = seed::service("General Consultation", 30, vec![provider.id, second_provider.id]);

    let settings = BusinessSettings {
        clinic_name: "Test Clinic".to_string(),
        working_hours: seed::standard_hours(),
    };
    let store: DynClinicStore = Arc::new(InMemoryClinicStore::new(
        settings,
        vec![provider.clone(), second_provider.clone(), nurse.clone()],
        vec![service.clone()],
    ));

    Fixture {
        booking: AppointmentBookingService::new(store),
        provider,
        second_provider,
        nurse,
        service,
    }
}

fn wednesday_at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 4)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn create_request(fx: &Fixture, start: NaiveDateTime) -> CreateAppointmentRequest {
    CreateAppointmentRequest {
        patient_id: Uuid::new_v4(),
        provider_id: fx.provider.id,
        service_id: fx.service.id,
        start_time: start,
        notes: None,
    }
}

#[tokio::test]
async fn booking_derives_end_time_and_records_creation() {
    let fx = fixture();
    let appointment = fx
        .booking
        .create_appointment(create_request(&fx, wednesday_at(10, 0)))
        .await
        .unwrap();

    assert_eq!(appointment.status, AppointmentStatus::Booked);
    assert_eq!(appointment.end_time, wednesday_at(10, 30));
    assert_eq!(appointment.audit_trail.len(), 1);
    assert_eq!(appointment.audit_trail[0].event, AuditEvent::Created);
}

#[tokio::test]
async fn double_booking_is_rejected_at_commit_time() {
    let fx = fixture();
    fx.booking
        .create_appointment(create_request(&fx, wednesday_at(10, 0)))
        .await
        .unwrap();

    // Identical slot.
    assert_matches!(
        fx.booking
            .create_appointment(create_request(&fx, wednesday_at(10, 0)))
            .await,
        Err(AppointmentError::Conflict { .. })
    );

    // Partial overlap is just as dead.
    assert_matches!(
        fx.booking
            .create_appointment(create_request(&fx, wednesday_at(10, 15)))
            .await,
        Err(AppointmentError::Conflict { .. })
    );

    // The adjacent slot is fine.
    assert!(fx
        .booking
        .create_appointment(create_request(&fx, wednesday_at(10, 30)))
        .await
        .is_ok());
}

#[tokio::test]
async fn concurrent_bookings_for_one_slot_commit_exactly_once() {
    let fx = fixture();
    let first = fx.booking.create_appointment(create_request(&fx, wednesday_at(11, 0)));
    let second = fx.booking.create_appointment(create_request(&fx, wednesday_at(11, 0)));

    let (a, b) = tokio::join!(first, second);
    let successes = [&a, &b].iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);
    assert!(matches!(
        [a, b].into_iter().find(|r| r.is_err()),
        Some(Err(AppointmentError::Conflict { .. }))
    ));
}

#[tokio::test]
async fn reschedule_may_overlap_the_old_time_of_the_same_booking() {
    let fx = fixture();
    let appointment = fx
        .booking
        .create_appointment(create_request(&fx, wednesday_at(10, 0)))
        .await
        .unwrap();

    let moved = fx
        .booking
        .reschedule_appointment(
            appointment.id,
            RescheduleAppointmentRequest {
                new_start_time: wednesday_at(10, 15),
                new_provider_id: None,
                reason: Some("patient running late".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(moved.start_time, wednesday_at(10, 15));
    assert_eq!(moved.end_time, wednesday_at(10, 45));
    assert_eq!(moved.audit_trail.last().unwrap().event, AuditEvent::Rescheduled);
}

#[tokio::test]
async fn reschedule_onto_an_occupied_slot_conflicts() {
    let fx = fixture();
    fx.booking
        .create_appointment(create_request(&fx, wednesday_at(9, 0)))
        .await
        .unwrap();
    let movable = fx
        .booking
        .create_appointment(create_request(&fx, wednesday_at(14, 0)))
        .await
        .unwrap();

    assert_matches!(
        fx.booking
            .reschedule_appointment(
                movable.id,
                RescheduleAppointmentRequest {
                    new_start_time: wednesday_at(9, 0),
                    new_provider_id: None,
                    reason: None,
                },
            )
            .await,
        Err(AppointmentError::Conflict { .. })
    );
}

#[tokio::test]
async fn reschedule_can_move_to_another_eligible_provider() {
    let fx = fixture();
    let appointment = fx
        .booking
        .create_appointment(create_request(&fx, wednesday_at(10, 0)))
        .await
        .unwrap();

    let moved = fx
        .booking
        .reschedule_appointment(
            appointment.id,
            RescheduleAppointmentRequest {
                new_start_time: wednesday_at(10, 0),
                new_provider_id: Some(fx.second_provider.id),
                reason: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(moved.provider_id, fx.second_provider.id);
}

#[tokio::test]
async fn cancelling_frees_the_slot_and_keeps_the_reason() {
    let fx = fixture();
    let appointment = fx
        .booking
        .create_appointment(create_request(&fx, wednesday_at(10, 0)))
        .await
        .unwrap();

    let cancelled = fx
        .booking
        .cancel_appointment(
            appointment.id,
            CancelAppointmentRequest {
                reason: "patient request".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(cancelled.status, AppointmentStatus::Cancelled);
    assert_eq!(cancelled.cancellation_reason.as_deref(), Some("patient request"));

    // The freed slot is bookable again.
    assert!(fx
        .booking
        .create_appointment(create_request(&fx, wednesday_at(10, 0)))
        .await
        .is_ok());
}

#[tokio::test]
async fn status_transitions_are_checked_exhaustively() {
    let fx = fixture();
    let appointment = fx
        .booking
        .create_appointment(create_request(&fx, wednesday_at(10, 0)))
        .await
        .unwrap();

    // Booked cannot jump straight to Completed.
    assert_matches!(
        fx.booking
            .update_status(appointment.id, AppointmentStatus::Completed)
            .await,
        Err(AppointmentError::InvalidStatusTransition { .. })
    );

    fx.booking
        .update_status(appointment.id, AppointmentStatus::Confirmed)
        .await
        .unwrap();
    let completed = fx
        .booking
        .update_status(appointment.id, AppointmentStatus::Completed)
        .await
        .unwrap();
    assert_eq!(completed.status, AppointmentStatus::Completed);

    // Completed is terminal, including for reschedules.
    assert_matches!(
        fx.booking
            .reschedule_appointment(
                appointment.id,
                RescheduleAppointmentRequest {
                    new_start_time: wednesday_at(15, 0),
                    new_provider_id: None,
                    reason: None,
                },
            )
            .await,
        Err(AppointmentError::Validation(_))
    );
}

#[tokio::test]
async fn audit_trail_only_ever_grows() {
    let fx = fixture();
    let appointment = fx
        .booking
        .create_appointment(create_request(&fx, wednesday_at(10, 0)))
        .await
        .unwrap();

    fx.booking
        .update_status(appointment.id, AppointmentStatus::Confirmed)
        .await
        .unwrap();
    let current = fx
        .booking
        .reschedule_appointment(
            appointment.id,
            RescheduleAppointmentRequest {
                new_start_time: wednesday_at(11, 0),
                new_provider_id: None,
                reason: None,
            },
        )
        .await
        .unwrap();

    let events: Vec<AuditEvent> = current.audit_trail.iter().map(|e| e.event).collect();
    assert_eq!(
        events,
        vec![AuditEvent::Created, AuditEvent::StatusChanged, AuditEvent::Rescheduled]
    );
    // The original entry is still intact.
    assert_eq!(current.audit_trail[0].detail, appointment.audit_trail[0].detail);
}

#[tokio::test]
async fn uncredentialed_or_unknown_targets_are_rejected() {
    let fx = fixture();

    let mut request = create_request(&fx, wednesday_at(10, 0));
    request.service_id = Uuid::new_v4();
    assert_matches!(
        fx.booking.create_appointment(request).await,
        Err(AppointmentError::ServiceNotFound(_))
    );

    let mut request = create_request(&fx, wednesday_at(10, 0));
    request.provider_id = Uuid::new_v4();
    assert_matches!(
        fx.booking.create_appointment(request).await,
        Err(AppointmentError::ProviderNotFound(_))
    );

    let mut request = create_request(&fx, wednesday_at(10, 0));
    request.provider_id = fx.nurse.id;
    assert_matches!(
        fx.booking.create_appointment(request).await,
        Err(AppointmentError::ProviderNotEligible(_))
    );
}
