//! Object-store path allocation for image uploads.
//!
//! The client uploads bytes straight to the hosted object store; this
//! endpoint only hands out the validated path under the caller's own prefix.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use indiereel_core::storage::object_path;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `POST /uploads/path`.
#[derive(Debug, Deserialize)]
pub struct UploadPathRequest {
    /// Owning collection, e.g. `actors` or `movies`.
    pub entity: String,
    pub filename: String,
}

#[derive(Debug, Serialize)]
pub struct UploadPathResponse {
    pub path: String,
}

/// POST /api/v1/uploads/path
pub async fn upload_path(
    auth: AuthUser,
    State(_state): State<AppState>,
    Json(input): Json<UploadPathRequest>,
) -> AppResult<impl IntoResponse> {
    let path = object_path(&input.entity, &auth.user_id, &input.filename)?;

    tracing::debug!(user_id = %auth.user_id, %path, "Upload path issued");

    Ok(Json(DataResponse {
        data: UploadPathResponse { path },
    }))
}
