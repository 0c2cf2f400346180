//! Handlers for collaboration requests and their chat threads.
//!
//! Only the two participants of a request can see it. Everyone else gets a
//! 404, the same as for a request that does not exist.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use indiereel_core::entities::message::CreateMessage;
use indiereel_core::entities::request::{CreateRequest, RequestStatusPatch};
use indiereel_core::types::DocId;
use indiereel_db::repositories::{Mailbox, MessageRepo, RequestRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::list_query;
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// GET /api/v1/requests?box=inbox|outbox
///
/// Defaults to the inbox. Filterable by `status`, `kind` and `movieId`.
pub async fn list_requests(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<impl IntoResponse> {
    let mailbox = match params.get("box") {
        Some(raw) => raw.parse::<Mailbox>()?,
        None => Mailbox::default(),
    };
    let query = list_query(&params)?;
    let page = RequestRepo::list(state.store(), &auth.user_id, mailbox, &query).await?;
    Ok(Json(PageResponse::from(page)))
}

/// POST /api/v1/requests
pub async fn create_request(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateRequest>,
) -> AppResult<impl IntoResponse> {
    let request = RequestRepo::create(state.store(), &state.names, &auth.user_id, input).await?;

    tracing::info!(
        request_id = %request.id,
        from_user_id = %auth.user_id,
        to_user_id = %request.to_user_id,
        kind = %request.kind,
        "Request sent",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: request })))
}

/// GET /api/v1/requests/{id}
pub async fn get_request(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DocId>,
) -> AppResult<impl IntoResponse> {
    let request = RequestRepo::get(state.store(), &auth.user_id, &id).await?;
    Ok(Json(DataResponse { data: request }))
}

/// PUT /api/v1/requests/{id}/status
///
/// The recipient accepts or declines; the sender cancels.
pub async fn set_request_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DocId>,
    Json(input): Json<RequestStatusPatch>,
) -> AppResult<impl IntoResponse> {
    let request = RequestRepo::set_status(state.store(), &auth.user_id, &id, input.status).await?;

    tracing::info!(
        request_id = %id,
        user_id = %auth.user_id,
        status = %request.status,
        "Request status changed",
    );

    Ok(Json(DataResponse { data: request }))
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

/// GET /api/v1/requests/{id}/messages
///
/// The whole thread, oldest first.
pub async fn list_messages(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DocId>,
) -> AppResult<impl IntoResponse> {
    let messages = MessageRepo::list_thread(state.store(), &auth.user_id, &id).await?;
    Ok(Json(DataResponse { data: messages }))
}

/// POST /api/v1/requests/{id}/messages
///
/// Only allowed once the request has been accepted.
pub async fn post_message(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DocId>,
    Json(input): Json<CreateMessage>,
) -> AppResult<impl IntoResponse> {
    let message = MessageRepo::post(state.store(), &state.names, &auth.user_id, &id, input).await?;

    tracing::debug!(request_id = %id, message_id = %message.id, "Message posted");

    Ok((StatusCode::CREATED, Json(DataResponse { data: message })))
}
