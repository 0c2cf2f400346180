pub mod actors;
pub mod filmmakers;
pub mod health;
pub mod movies;
pub mod posts;
pub mod ratings;
pub mod requests;
pub mod uploads;
pub mod users;
pub mod venues;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree. Every route requires a Bearer token.
///
/// Route hierarchy:
///
/// ```text
/// /actors                                  list, create
/// /actors/{id}                             get, update (owner)
///
/// /filmmakers                              list, create
/// /filmmakers/{id}                         get, update (owner)
///
/// /movies                                  list, create
/// /movies/{id}                             detail, update (owner)
/// /movies/{id}/ratings                     list, rate
/// /movies/{id}/rating                      rating summary
///
/// /ratings/{id}                            update, soft delete (author)
///
/// /posts                                   list, create
/// /posts/{id}                              get, update (author)
/// /posts/{id}/like                         like, unlike
///
/// /venues                                  list, create
/// /venues/{id}                             get, update (owner)
///
/// /requests                                list (?box=), send
/// /requests/{id}                           get (participants)
/// /requests/{id}/status                    accept, decline, cancel
/// /requests/{id}/messages                  chat thread, post
///
/// /users/me                                get, upsert
/// /users/{id}/name                         disambiguated display name
/// /users/{id}/follow                       follow, unfollow
/// /users/{id}/followers                    list
/// /users/{id}/following                    list
///
/// /uploads/path                            allocate an image path
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/actors", actors::router())
        .nest("/filmmakers", filmmakers::router())
        .nest("/movies", movies::router())
        .nest("/ratings", ratings::router())
        .nest("/posts", posts::router())
        .nest("/venues", venues::router())
        .nest("/requests", requests::router())
        .nest("/users", users::router())
        .nest("/uploads", uploads::router())
}
