use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use shared_models::domain::Appointment;
use shared_models::error::AppError;
use shared_storage::AppState;

use crate::models::{
    CancelAppointmentRequest, CreateAppointmentRequest, RescheduleAppointmentRequest,
    UpdateStatusRequest,
};
use crate::services::AppointmentBookingService;

#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateAppointmentRequest>,
) -> Result<Json<Appointment>, AppError> {
    let booking = AppointmentBookingService::new(state.store.clone());
    let appointment = booking
        .create_appointment(request)
        .await
        .map_err(AppError::from)?;
    Ok(Json(appointment))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<AppState>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Appointment>, AppError> {
    let booking = AppointmentBookingService::new(state.store.clone());
    let appointment = booking
        .get_appointment(appointment_id)
        .await
        .map_err(AppError::from)?;
    Ok(Json(appointment))
}

#[axum::debug_handler]
pub async fn reschedule_appointment(
    State(state): State<Arc<AppState>>,
    Path(appointment_id): Path<Uuid>,
    Json(request): Json<RescheduleAppointmentRequest>,
) -> Result<Json<Appointment>, AppError> {
    let booking = AppointmentBookingService::new(state.store.clone());
    let appointment = booking
        .reschedule_appointment(appointment_id, request)
        .await
        .map_err(AppError::from)?;
    Ok(Json(appointment))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<AppState>>,
    Path(appointment_id): Path<Uuid>,
    Json(request): Json<CancelAppointmentRequest>,
) -> Result<Json<Appointment>, AppError> {
    let booking = AppointmentBookingService::new(state.store.clone());
    let appointment = booking
        .cancel_appointment(appointment_id, request)
        .await
        .map_err(AppError::from)?;
    Ok(Json(appointment))
}

#[axum::debug_handler]
pub async fn update_appointment_status(
    State(state): State<Arc<AppState>>,
    Path(appointment_id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Appointment>, AppError> {
    let booking = AppointmentBookingService::new(state.store.clone());
    let appointment = booking
        .update_status(appointment_id, request.status)
        .await
        .map_err(AppError::from)?;
    Ok(Json(appointment))
}
