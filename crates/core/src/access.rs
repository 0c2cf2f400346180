//! Ownership checks for mutating operations.
//!
//! Every write path asks the same question, "may user U mutate record R",
//! through [`ensure_can_mutate`]. Record types answer it by implementing
//! [`Owned`].

use crate::entity::Entity;
use crate::error::CoreError;

/// A record with an owning user.
pub trait Owned {
    /// The id of the user that owns the record, if recorded.
    fn owner_id(&self) -> Option<&str>;

    /// Whether `user_id` may mutate this record. Defaults to ownership.
    fn can_mutate(&self, user_id: &str) -> bool {
        !user_id.is_empty() && self.owner_id() == Some(user_id)
    }
}

/// Fail with [`CoreError::Forbidden`] unless `user_id` may mutate `record`.
pub fn ensure_can_mutate<R>(user_id: &str, record: &R) -> Result<(), CoreError>
where
    R: Owned + Entity,
{
    if record.can_mutate(user_id) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "You do not have permission to modify this {}",
            R::NAME.to_lowercase()
        )))
    }
}
