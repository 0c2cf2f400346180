//! Repository for the `venues` collection.

use indiereel_core::access::ensure_can_mutate;
use indiereel_core::entities::venue::{CreateVenue, UpdateVenue, Venue};
use indiereel_core::refine::{ListQuery, Page};

use super::{require_text, require_text_if_present};
use crate::error::DbResult;
use crate::reader::EntityReader;
use crate::store::DocumentStore;

pub struct VenueRepo;

impl VenueRepo {
    pub async fn list(store: &dyn DocumentStore, query: &ListQuery) -> DbResult<Page<Venue>> {
        EntityReader::list(store, query).await
    }

    pub async fn get(store: &dyn DocumentStore, id: &str, viewer: &str) -> DbResult<Venue> {
        EntityReader::find_viewable(store, id, viewer).await
    }

    pub async fn create(
        store: &dyn DocumentStore,
        user_id: &str,
        input: CreateVenue,
    ) -> DbResult<Venue> {
        require_text("name", &input.name)?;

        let venue = EntityReader::create(store, &input.into_venue(user_id)).await?;
        Ok(venue)
    }

    pub async fn update(
        store: &dyn DocumentStore,
        user_id: &str,
        id: &str,
        input: &UpdateVenue,
    ) -> DbResult<Venue> {
        let existing: Venue = EntityReader::find_viewable(store, id, user_id).await?;
        ensure_can_mutate(user_id, &existing)?;
        require_text_if_present("name", input.name.as_deref())?;

        let venue = EntityReader::patch(store, id, input).await?;
        Ok(venue)
    }
}
