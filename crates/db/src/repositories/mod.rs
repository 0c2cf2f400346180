//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async operations that
//! accept `&dyn DocumentStore` as the first argument. Mutations check
//! ownership through `ensure_can_mutate` before writing, and repositories
//! that denormalize names also take the shared [`DisplayNameResolver`].
//!
//! [`DisplayNameResolver`]: crate::names::DisplayNameResolver

pub mod actor_repo;
pub mod filmmaker_repo;
pub mod message_repo;
pub mod movie_repo;
pub mod post_repo;
pub mod rating_repo;
pub mod request_repo;
pub mod social_repo;
pub mod user_repo;
pub mod venue_repo;

pub use actor_repo::ActorRepo;
pub use filmmaker_repo::FilmmakerRepo;
pub use message_repo::MessageRepo;
pub use movie_repo::{MovieDetail, MovieRepo};
pub use post_repo::PostRepo;
pub use rating_repo::{RateOutcome, RatingRepo};
pub use request_repo::{Mailbox, RequestRepo};
pub use social_repo::{FollowRepo, LikeRepo, LikeState};
pub use user_repo::UserRepo;
pub use venue_repo::VenueRepo;

use indiereel_core::error::CoreError;

/// Reject a required text field that is blank after trimming.
pub(crate) fn require_text(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        Err(CoreError::Validation(format!("{field} must not be empty")))
    } else {
        Ok(())
    }
}

/// Like [`require_text`], for a field that is only checked when supplied.
pub(crate) fn require_text_if_present(field: &str, value: Option<&str>) -> Result<(), CoreError> {
    value.map_or(Ok(()), |v| require_text(field, v))
}
