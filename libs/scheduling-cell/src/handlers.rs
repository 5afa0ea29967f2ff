use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use shared_models::error::AppError;
use shared_storage::AppState;

use crate::models::{AvailabilityView, SlotPolicy};
use crate::services::AvailabilityService;

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub service_id: Uuid,
    pub date: String,
}

#[axum::debug_handler]
pub async fn get_availability(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityView>, AppError> {
    // Parsed by hand so a malformed date fails loudly instead of feeding
    // the slot grid garbage.
    let date = NaiveDate::parse_from_str(&query.date, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("expected YYYY-MM-DD, got '{}'", query.date)))?;

    let service = AvailabilityService::new(
        state.store.clone(),
        SlotPolicy::from_config(&state.config),
    );

    let view = service
        .compute_availability(query.service_id, date)
        .await
        .map_err(AppError::from)?;

    Ok(Json(view))
}
