use std::sync::Arc;

use axum::{routing::get, Router};

use shared_storage::AppState;

use crate::handlers;

pub fn scheduling_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/availability", get(handlers::get_availability))
        .with_state(state)
}
