//! Trip services - listing trips and enrolling clients

use crate::core::{AppError, AppJson, AppPath, AppQuery, AppState};
use crate::dtos::{AssignClientDTO, PagedTripsDTO, TripsQuery};
use crate::trips::{self, ClientData, PageRequest};
use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use axum_macros::debug_handler;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use validator::Validate;

#[instrument(skip(state), fields(page = ?params.page, page_size = ?params.page_size))]
pub async fn list_trips(
    State(state): State<Arc<AppState>>,
    AppQuery(params): AppQuery<TripsQuery>, // /api/trips?page=1&pageSize=10
) -> Result<Json<PagedTripsDTO>, AppError> {
    debug!("Listing trips");
    let page = PageRequest::new(
        params.page.unwrap_or(1),
        params.page_size.unwrap_or(state.default_page_size),
    );

    let result = trips::get_trips(state.store.as_ref(), page).await?;

    info!("Returning {} trips", result.items.len());
    Ok(Json(PagedTripsDTO::from(result)))
}

#[debug_handler]
#[instrument(skip(state, body), fields(trip_id = %trip_id))]
pub async fn assign_client_to_trip(
    State(state): State<Arc<AppState>>,
    AppPath(trip_id): AppPath<i32>, // /api/trips/{trip_id}/clients
    AppJson(body): AppJson<AssignClientDTO>,
) -> Result<StatusCode, AppError> {
    debug!("Assigning client to trip");
    body.validate()?;

    let data = ClientData::from(body);
    let enrollment = trips::assign_client_to_trip(state.store.as_ref(), trip_id, &data).await?;

    info!("Client {} assigned to trip {}", enrollment.id_client, trip_id);
    Ok(StatusCode::OK)
}
