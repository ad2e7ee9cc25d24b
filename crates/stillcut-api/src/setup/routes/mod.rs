//! Route configuration and setup.

mod health;

use crate::handlers::{
    save::{method_not_allowed, save_image},
    scaled::scaled_image,
};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub fn setup_routes(state: Arc<AppState>) -> Router<()> {
    Router::new()
        .route(
            "/save",
            post(save_image)
                .fallback(method_not_allowed)
                // The upload pipeline truncates at its own limit.
                .layer(DefaultBodyLimit::disable()),
        )
        .route("/scaled", get(scaled_image))
        .merge(health_routes())
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

fn health_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::liveness_check))
        .route("/health/ready", get(health::readiness_check))
}
