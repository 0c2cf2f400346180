use axum::routing::get;
use axum::Router;

use crate::handlers::venues;
use crate::state::AppState;

/// Venue routes mounted at `/venues`.
///
/// ```text
/// GET    /          -> list_venues
/// POST   /          -> create_venue
/// GET    /{id}      -> get_venue
/// PUT    /{id}      -> update_venue
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(venues::list_venues).post(venues::create_venue))
        .route("/{id}", get(venues::get_venue).put(venues::update_venue))
}
