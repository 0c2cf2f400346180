//! Handlers for editing and withdrawing an existing rating.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use indiereel_core::entities::rating::UpdateRating;
use indiereel_core::types::DocId;
use indiereel_db::repositories::RatingRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// PUT /api/v1/ratings/{id}
pub async fn update_rating(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DocId>,
    Json(input): Json<UpdateRating>,
) -> AppResult<impl IntoResponse> {
    let rating = RatingRepo::update(state.store(), &auth.user_id, &id, &input).await?;

    tracing::info!(rating_id = %id, user_id = %auth.user_id, "Rating updated");

    Ok(Json(DataResponse { data: rating }))
}

/// DELETE /api/v1/ratings/{id}
///
/// Soft delete. The rating stops counting toward the movie's summary.
pub async fn delete_rating(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DocId>,
) -> AppResult<impl IntoResponse> {
    RatingRepo::soft_delete(state.store(), &auth.user_id, &id).await?;

    tracing::info!(rating_id = %id, user_id = %auth.user_id, "Rating deleted");

    Ok(StatusCode::NO_CONTENT)
}
