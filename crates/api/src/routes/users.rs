use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// User routes mounted at `/users`.
///
/// ```text
/// GET    /me                -> get_me
/// PUT    /me                -> upsert_me
/// GET    /{id}/name         -> get_display_name
/// POST   /{id}/follow       -> follow_user
/// DELETE /{id}/follow       -> unfollow_user
/// GET    /{id}/followers    -> list_followers
/// GET    /{id}/following    -> list_following
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(users::get_me).put(users::upsert_me))
        .route("/{id}/name", get(users::get_display_name))
        .route(
            "/{id}/follow",
            post(users::follow_user).delete(users::unfollow_user),
        )
        .route("/{id}/followers", get(users::list_followers))
        .route("/{id}/following", get(users::list_following))
}
