//! Trip service library - exposes the modules for the binary and the tests

pub mod core;
pub mod dtos;
pub mod entities;
pub mod repositories;
pub mod services;
pub mod trips;

// Re-export of the main types to ease imports
pub use core::{AppError, AppState, config};
pub use services::root;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Builds the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/api/trips", configure_trip_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Routes of the trips API (listing, enrollment)
fn configure_trip_routes() -> Router<Arc<AppState>> {
    use services::*;

    Router::new()
        .route("/", get(list_trips))
        .route("/{trip_id}/clients", post(assign_client_to_trip))
}
