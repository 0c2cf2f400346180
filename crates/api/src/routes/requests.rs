use axum::routing::{get, put};
use axum::Router;

use crate::handlers::requests;
use crate::state::AppState;

/// Collaboration request routes mounted at `/requests`.
///
/// ```text
/// GET    /                  -> list_requests (?box=inbox|outbox)
/// POST   /                  -> create_request
/// GET    /{id}              -> get_request
/// PUT    /{id}/status       -> set_request_status
/// GET    /{id}/messages     -> list_messages
/// POST   /{id}/messages     -> post_message
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(requests::list_requests).post(requests::create_request),
        )
        .route("/{id}", get(requests::get_request))
        .route("/{id}/status", put(requests::set_request_status))
        .route(
            "/{id}/messages",
            get(requests::list_messages).post(requests::post_message),
        )
}
