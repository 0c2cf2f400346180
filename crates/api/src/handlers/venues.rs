//! Handlers for screening venues.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use indiereel_core::entities::venue::{CreateVenue, UpdateVenue};
use indiereel_core::types::DocId;
use indiereel_db::repositories::VenueRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::list_query;
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

/// GET /api/v1/venues
pub async fn list_venues(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<impl IntoResponse> {
    let query = list_query(&params)?;
    let page = VenueRepo::list(state.store(), &query).await?;
    Ok(Json(PageResponse::from(page)))
}

/// POST /api/v1/venues
pub async fn create_venue(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateVenue>,
) -> AppResult<impl IntoResponse> {
    let venue = VenueRepo::create(state.store(), &auth.user_id, input).await?;

    tracing::info!(venue_id = %venue.id, user_id = %auth.user_id, "Venue created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: venue })))
}

/// GET /api/v1/venues/{id}
pub async fn get_venue(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DocId>,
) -> AppResult<impl IntoResponse> {
    let venue = VenueRepo::get(state.store(), &id, &auth.user_id).await?;
    Ok(Json(DataResponse { data: venue }))
}

/// PUT /api/v1/venues/{id}
pub async fn update_venue(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DocId>,
    Json(input): Json<UpdateVenue>,
) -> AppResult<impl IntoResponse> {
    let venue = VenueRepo::update(state.store(), &auth.user_id, &id, &input).await?;

    tracing::info!(venue_id = %id, user_id = %auth.user_id, "Venue updated");

    Ok(Json(DataResponse { data: venue }))
}
