//! Axum router wiring.

use axum::{
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, http::handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(handlers::healthz))
        .route("/v1/can", post(handlers::can))
        .route("/v1/is-a", post(handlers::is_a))
        .with_state(state)
}
