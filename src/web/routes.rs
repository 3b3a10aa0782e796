//! Route definitions

use super::handlers;
use super::state::AppState;
use axum::{routing::get, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // The tracker frontend calls the scraper from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/search", get(handlers::search))
        .route("/platforms", get(handlers::platforms))
        .route("/health", get(handlers::health))
        .layer(CatchPanicLayer::new())
        .layer(cors)
        .with_state(state)
}
