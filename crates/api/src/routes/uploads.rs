use axum::routing::post;
use axum::Router;

use crate::handlers::uploads;
use crate::state::AppState;

/// Upload routes mounted at `/uploads`.
///
/// ```text
/// POST   /path      -> upload_path
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/path", post(uploads::upload_path))
}
