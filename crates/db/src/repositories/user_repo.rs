//! Repository for the `users` collection.
//!
//! Profiles are keyed by the identity provider's user id, so writes are
//! upserts at a known id rather than inserts.

use indiereel_core::entities::user::{UpsertUserProfile, UserProfile};
use indiereel_core::entity::Entity;

use super::require_text_if_present;
use crate::error::DbResult;
use crate::names::DisplayNameResolver;
use crate::reader::EntityReader;
use crate::store::{to_data, DocumentStore};

pub struct UserRepo;

impl UserRepo {
    pub async fn get(store: &dyn DocumentStore, id: &str) -> DbResult<UserProfile> {
        EntityReader::find_required(store, id).await
    }

    /// Create or update the caller's own profile. Invalidates the cached
    /// display-name index.
    pub async fn upsert_me(
        store: &dyn DocumentStore,
        names: &DisplayNameResolver,
        user_id: &str,
        input: &UpsertUserProfile,
    ) -> DbResult<UserProfile> {
        require_text_if_present("displayName", input.display_name.as_deref())?;

        let doc = store
            .upsert(UserProfile::COLLECTION, user_id, to_data(input)?)
            .await?;
        names.invalidate().await;
        Ok(doc.decode()?)
    }
}
