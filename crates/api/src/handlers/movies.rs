//! Handlers for movie listings and their ratings.
//!
//! Rating writes live here when they are scoped to a movie
//! (`/movies/{id}/ratings`); edits to an existing rating go through
//! [`super::ratings`].

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use indiereel_core::entities::movie::{CreateMovie, UpdateMovie};
use indiereel_core::entities::rating::CreateRating;
use indiereel_core::types::DocId;
use indiereel_db::repositories::{MovieRepo, RatingRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::list_query;
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Movies
// ---------------------------------------------------------------------------

/// GET /api/v1/movies
///
/// Published movies, newest first. Filterable by `genre`, `status`,
/// `location` and `filmmakerId`.
pub async fn list_movies(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<impl IntoResponse> {
    let query = list_query(&params)?;
    let page = MovieRepo::list(state.store(), &query).await?;
    Ok(Json(PageResponse::from(page)))
}

/// POST /api/v1/movies
pub async fn create_movie(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateMovie>,
) -> AppResult<impl IntoResponse> {
    let movie = MovieRepo::create(state.store(), &state.names, &auth.user_id, input).await?;

    tracing::info!(movie_id = %movie.id, user_id = %auth.user_id, "Movie created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: movie })))
}

/// GET /api/v1/movies/{id}
///
/// The movie together with its filmmaker profile and live rating summary.
/// Either related part is `null` if it could not be loaded.
pub async fn get_movie(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DocId>,
) -> AppResult<impl IntoResponse> {
    let detail = MovieRepo::detail(state.store(), &id, &auth.user_id).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/v1/movies/{id}
pub async fn update_movie(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DocId>,
    Json(input): Json<UpdateMovie>,
) -> AppResult<impl IntoResponse> {
    let movie = MovieRepo::update(state.store(), &auth.user_id, &id, &input).await?;

    tracing::info!(movie_id = %id, user_id = %auth.user_id, "Movie updated");

    Ok(Json(DataResponse { data: movie }))
}

// ---------------------------------------------------------------------------
// Movie-scoped ratings
// ---------------------------------------------------------------------------

/// GET /api/v1/movies/{id}/ratings
pub async fn list_movie_ratings(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DocId>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<impl IntoResponse> {
    let query = list_query(&params)?;
    let page = RatingRepo::list_for_movie(state.store(), &id, &query).await?;
    Ok(Json(PageResponse::from(page)))
}

/// POST /api/v1/movies/{id}/ratings
///
/// Rate a movie. A user holds at most one live rating per movie: a second
/// submission replaces the first and answers 200 instead of 201.
pub async fn rate_movie(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DocId>,
    Json(input): Json<CreateRating>,
) -> AppResult<impl IntoResponse> {
    let outcome = RatingRepo::rate(state.store(), &state.names, &auth.user_id, &id, input).await?;

    tracing::info!(
        movie_id = %id,
        rating_id = %outcome.rating.id,
        user_id = %auth.user_id,
        created = outcome.created,
        "Movie rated",
    );

    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(DataResponse { data: outcome.rating })))
}

/// GET /api/v1/movies/{id}/rating
///
/// Average and count over live ratings, computed on read.
pub async fn get_rating_summary(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DocId>,
) -> AppResult<impl IntoResponse> {
    MovieRepo::get(state.store(), &id, &auth.user_id).await?;
    let summary = RatingRepo::summary_for_movie(state.store(), &id).await?;
    Ok(Json(DataResponse { data: summary }))
}
