//! Request handlers, one module per resource.
//!
//! Handlers extract the caller via [`crate::middleware::auth::AuthUser`],
//! delegate to the repositories in `indiereel_db` and map errors via
//! [`crate::error::AppError`].

pub mod actors;
pub mod filmmakers;
pub mod movies;
pub mod posts;
pub mod ratings;
pub mod requests;
pub mod uploads;
pub mod users;
pub mod venues;
