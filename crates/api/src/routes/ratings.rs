use axum::routing::put;
use axum::Router;

use crate::handlers::ratings;
use crate::state::AppState;

/// Rating routes mounted at `/ratings`.
///
/// ```text
/// PUT    /{id}      -> update_rating
/// DELETE /{id}      -> delete_rating (soft)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        put(ratings::update_rating).delete(ratings::delete_rating),
    )
}
