//! Handlers for user profiles, display names and follows.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use indiereel_core::entities::user::UpsertUserProfile;
use indiereel_core::types::DocId;
use indiereel_db::repositories::{FollowRepo, UserRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response body for `GET /users/{id}/name`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayNameResponse {
    pub user_id: DocId,
    pub display_name: String,
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

/// GET /api/v1/users/me
pub async fn get_me(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let user = UserRepo::get(state.store(), &auth.user_id).await?;
    Ok(Json(DataResponse { data: user }))
}

/// PUT /api/v1/users/me
///
/// Create or merge the caller's profile.
pub async fn upsert_me(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpsertUserProfile>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::upsert_me(state.store(), &state.names, &auth.user_id, &input).await?;

    tracing::info!(user_id = %auth.user_id, "User profile saved");

    Ok(Json(DataResponse { data: user }))
}

/// GET /api/v1/users/{id}/name
///
/// The disambiguated display name. Never fails: unknown users fall back to
/// a truncated id.
pub async fn get_display_name(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DocId>,
) -> AppResult<impl IntoResponse> {
    let display_name = state.names.display_name(state.store(), &id).await;
    Ok(Json(DataResponse {
        data: DisplayNameResponse {
            user_id: id,
            display_name,
        },
    }))
}

// ---------------------------------------------------------------------------
// Follows
// ---------------------------------------------------------------------------

/// POST /api/v1/users/{id}/follow
pub async fn follow_user(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DocId>,
) -> AppResult<impl IntoResponse> {
    let follow = FollowRepo::follow(state.store(), &auth.user_id, &id).await?;

    tracing::info!(follower_id = %auth.user_id, followee_id = %id, "User followed");

    Ok((StatusCode::CREATED, Json(DataResponse { data: follow })))
}

/// DELETE /api/v1/users/{id}/follow
///
/// Idempotent: unfollowing someone not followed is still a 204.
pub async fn unfollow_user(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DocId>,
) -> AppResult<impl IntoResponse> {
    let removed = FollowRepo::unfollow(state.store(), &auth.user_id, &id).await?;

    tracing::info!(follower_id = %auth.user_id, followee_id = %id, removed, "User unfollowed");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/users/{id}/followers
pub async fn list_followers(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DocId>,
) -> AppResult<impl IntoResponse> {
    let follows = FollowRepo::followers(state.store(), &id).await?;
    Ok(Json(DataResponse { data: follows }))
}

/// GET /api/v1/users/{id}/following
pub async fn list_following(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DocId>,
) -> AppResult<impl IntoResponse> {
    let follows = FollowRepo::following(state.store(), &id).await?;
    Ok(Json(DataResponse { data: follows }))
}
