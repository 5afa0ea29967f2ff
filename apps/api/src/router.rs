use std::sync::Arc;

use axum::{routing::get, Router};

use appointment_cell::router::appointment_routes;
use scheduling_cell::router::scheduling_routes;
use shared_storage::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Clinic scheduling API is running!" }))
        .nest("/scheduling", scheduling_routes(state.clone()))
        .nest("/appointments", appointment_routes(state))
}
