//! Handlers for filmmaker profiles.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use indiereel_core::entities::filmmaker::{CreateFilmmaker, UpdateFilmmaker};
use indiereel_core::types::DocId;
use indiereel_db::repositories::FilmmakerRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::list_query;
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

/// GET /api/v1/filmmakers
///
/// Public filmmaker profiles, newest first. Filterable by `location` and
/// `specialties`; `q` searches name, company, location and bio.
pub async fn list_filmmakers(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<impl IntoResponse> {
    let query = list_query(&params)?;
    let page = FilmmakerRepo::list(state.store(), &query).await?;
    Ok(Json(PageResponse::from(page)))
}

/// POST /api/v1/filmmakers
///
/// Create the caller's filmmaker profile. One per user.
pub async fn create_filmmaker(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateFilmmaker>,
) -> AppResult<impl IntoResponse> {
    let filmmaker = FilmmakerRepo::create(state.store(), &state.names, &auth.user_id, input).await?;

    tracing::info!(filmmaker_id = %filmmaker.id, user_id = %auth.user_id, "Filmmaker profile created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: filmmaker })))
}

/// GET /api/v1/filmmakers/{id}
pub async fn get_filmmaker(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DocId>,
) -> AppResult<impl IntoResponse> {
    let filmmaker = FilmmakerRepo::get(state.store(), &id, &auth.user_id).await?;
    Ok(Json(DataResponse { data: filmmaker }))
}

/// PUT /api/v1/filmmakers/{id}
///
/// Owner only. Absent fields are left untouched.
pub async fn update_filmmaker(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DocId>,
    Json(input): Json<UpdateFilmmaker>,
) -> AppResult<impl IntoResponse> {
    let filmmaker = FilmmakerRepo::update(state.store(), &state.names, &auth.user_id, &id, &input).await?;

    tracing::info!(filmmaker_id = %id, user_id = %auth.user_id, "Filmmaker profile updated");

    Ok(Json(DataResponse { data: filmmaker }))
}
