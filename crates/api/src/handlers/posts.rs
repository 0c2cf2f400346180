//! Handlers for community posts and likes.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use indiereel_core::entities::post::{CreatePost, UpdatePost};
use indiereel_core::types::DocId;
use indiereel_db::repositories::{LikeRepo, PostRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::list_query;
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

/// GET /api/v1/posts
///
/// Public posts, newest first. Filterable by `category`, `tags`, `authorId`
/// and `movieId`.
pub async fn list_posts(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<impl IntoResponse> {
    let query = list_query(&params)?;
    let page = PostRepo::list(state.store(), &query).await?;
    Ok(Json(PageResponse::from(page)))
}

/// POST /api/v1/posts
pub async fn create_post(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePost>,
) -> AppResult<impl IntoResponse> {
    let post = PostRepo::create(state.store(), &state.names, &auth.user_id, input).await?;

    tracing::info!(post_id = %post.id, user_id = %auth.user_id, "Post created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: post })))
}

/// GET /api/v1/posts/{id}
pub async fn get_post(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DocId>,
) -> AppResult<impl IntoResponse> {
    let post = PostRepo::get(state.store(), &id, &auth.user_id).await?;
    Ok(Json(DataResponse { data: post }))
}

/// PUT /api/v1/posts/{id}
pub async fn update_post(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DocId>,
    Json(input): Json<UpdatePost>,
) -> AppResult<impl IntoResponse> {
    let post = PostRepo::update(state.store(), &auth.user_id, &id, &input).await?;

    tracing::info!(post_id = %id, user_id = %auth.user_id, "Post updated");

    Ok(Json(DataResponse { data: post }))
}

/// POST /api/v1/posts/{id}/like
///
/// Idempotent. Returns the caller's like state and the post's like count.
pub async fn like_post(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DocId>,
) -> AppResult<impl IntoResponse> {
    let like = LikeRepo::like(state.store(), &auth.user_id, &id).await?;
    Ok(Json(DataResponse { data: like }))
}

/// DELETE /api/v1/posts/{id}/like
pub async fn unlike_post(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DocId>,
) -> AppResult<impl IntoResponse> {
    let like = LikeRepo::unlike(state.store(), &auth.user_id, &id).await?;
    Ok(Json(DataResponse { data: like }))
}
