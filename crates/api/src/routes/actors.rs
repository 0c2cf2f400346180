use axum::routing::get;
use axum::Router;

use crate::handlers::actors;
use crate::state::AppState;

/// Actor profile routes mounted at `/actors`.
///
/// ```text
/// GET    /          -> list_actors
/// POST   /          -> create_actor
/// GET    /{id}      -> get_actor
/// PUT    /{id}      -> update_actor
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(actors::list_actors).post(actors::create_actor))
        .route("/{id}", get(actors::get_actor).put(actors::update_actor))
}
