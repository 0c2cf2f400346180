use axum::routing::{get, post};
use axum::Router;

use crate::handlers::posts;
use crate::state::AppState;

/// Post routes mounted at `/posts`.
///
/// ```text
/// GET    /              -> list_posts
/// POST   /              -> create_post
/// GET    /{id}          -> get_post
/// PUT    /{id}          -> update_post
/// POST   /{id}/like     -> like_post
/// DELETE /{id}/like     -> unlike_post
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(posts::list_posts).post(posts::create_post))
        .route("/{id}", get(posts::get_post).put(posts::update_post))
        .route("/{id}/like", post(posts::like_post).delete(posts::unlike_post))
}
