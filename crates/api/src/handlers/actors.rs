//! Handlers for actor profiles.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use indiereel_core::entities::actor::{CreateActor, UpdateActor};
use indiereel_core::types::DocId;
use indiereel_db::repositories::ActorRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::list_query;
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

/// GET /api/v1/actors
///
/// Public actor profiles, newest first. Filterable by `location`, `skills`,
/// `ethnicity` and `ageRange`; `q` searches name, location, bio and skills.
pub async fn list_actors(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<impl IntoResponse> {
    let query = list_query(&params)?;
    let page = ActorRepo::list(state.store(), &query).await?;
    Ok(Json(PageResponse::from(page)))
}

/// POST /api/v1/actors
///
/// Create the caller's actor profile. One per user.
pub async fn create_actor(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateActor>,
) -> AppResult<impl IntoResponse> {
    let actor = ActorRepo::create(state.store(), &state.names, &auth.user_id, input).await?;

    tracing::info!(actor_id = %actor.id, user_id = %auth.user_id, "Actor profile created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: actor })))
}

/// GET /api/v1/actors/{id}
pub async fn get_actor(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DocId>,
) -> AppResult<impl IntoResponse> {
    let actor = ActorRepo::get(state.store(), &id, &auth.user_id).await?;
    Ok(Json(DataResponse { data: actor }))
}

/// PUT /api/v1/actors/{id}
///
/// Owner only. Absent fields are left untouched.
pub async fn update_actor(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DocId>,
    Json(input): Json<UpdateActor>,
) -> AppResult<impl IntoResponse> {
    let actor = ActorRepo::update(state.store(), &state.names, &auth.user_id, &id, &input).await?;

    tracing::info!(actor_id = %id, user_id = %auth.user_id, "Actor profile updated");

    Ok(Json(DataResponse { data: actor }))
}
