use axum::routing::get;
use axum::Router;

use crate::handlers::movies;
use crate::state::AppState;

/// Movie routes mounted at `/movies`.
///
/// ```text
/// GET    /                  -> list_movies
/// POST   /                  -> create_movie
/// GET    /{id}              -> get_movie (with filmmaker and rating summary)
/// PUT    /{id}              -> update_movie
/// GET    /{id}/ratings      -> list_movie_ratings
/// POST   /{id}/ratings      -> rate_movie
/// GET    /{id}/rating       -> get_rating_summary
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(movies::list_movies).post(movies::create_movie))
        .route("/{id}", get(movies::get_movie).put(movies::update_movie))
        .route(
            "/{id}/ratings",
            get(movies::list_movie_ratings).post(movies::rate_movie),
        )
        .route("/{id}/rating", get(movies::get_rating_summary))
}
