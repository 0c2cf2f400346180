use axum::routing::get;
use axum::Router;

use crate::handlers::filmmakers;
use crate::state::AppState;

/// Filmmaker profile routes mounted at `/filmmakers`.
///
/// ```text
/// GET    /          -> list_filmmakers
/// POST   /          -> create_filmmaker
/// GET    /{id}      -> get_filmmaker
/// PUT    /{id}      -> update_filmmaker
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(filmmakers::list_filmmakers).post(filmmakers::create_filmmaker))
        .route("/{id}", get(filmmakers::get_filmmaker).put(filmmakers::update_filmmaker))
}
