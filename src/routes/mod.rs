//! Route modules for the toolbox server

pub mod health;
pub mod media;
pub mod pdf;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router
///
/// Shared between the server binary and the integration tests.
pub fn app_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1/pdf", pdf::router())
        .nest("/api/v1/media", media::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
