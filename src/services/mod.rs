//! Services module - HTTP handlers
//!
//! Handlers extract the request, call into `trips` and turn the outcome into
//! a response; errors go through [`AppError`](crate::core::AppError).

pub mod trip;

pub use trip::{assign_client_to_trip, list_trips};

use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

/// Root endpoint - health check
pub async fn root(State(_state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, "Server is running!")
}
