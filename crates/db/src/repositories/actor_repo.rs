//! Repository for the `actors` collection.

use indiereel_core::access::ensure_can_mutate;
use indiereel_core::entities::actor::{Actor, CreateActor, UpdateActor};
use indiereel_core::error::CoreError;
use indiereel_core::refine::{ListQuery, Page};

use super::{require_text, require_text_if_present};
use crate::error::DbResult;
use crate::names::DisplayNameResolver;
use crate::reader::EntityReader;
use crate::store::{DocumentStore, Predicate};

/// Actor profiles. A user has at most one.
pub struct ActorRepo;

impl ActorRepo {
    /// One page of public actor profiles.
    pub async fn list(store: &dyn DocumentStore, query: &ListQuery) -> DbResult<Page<Actor>> {
        EntityReader::list(store, query).await
    }

    /// A public profile, or the viewer's own private one.
    pub async fn get(store: &dyn DocumentStore, id: &str, viewer: &str) -> DbResult<Actor> {
        EntityReader::find_viewable(store, id, viewer).await
    }

    /// The actor profile owned by `user_id`, public or not.
    pub async fn find_by_user(store: &dyn DocumentStore, user_id: &str) -> DbResult<Option<Actor>> {
        let actors: Vec<Actor> =
            EntityReader::fetch(store, &[Predicate::eq("userId", user_id)]).await?;
        Ok(actors.into_iter().next())
    }

    pub async fn create(
        store: &dyn DocumentStore,
        names: &DisplayNameResolver,
        user_id: &str,
        input: CreateActor,
    ) -> DbResult<Actor> {
        require_text("name", &input.name)?;
        if Self::find_by_user(store, user_id).await?.is_some() {
            return Err(CoreError::Conflict("You already have an actor profile".into()).into());
        }

        let actor = EntityReader::create(store, &input.into_actor(user_id)).await?;
        names.invalidate().await;
        Ok(actor)
    }

    pub async fn update(
        store: &dyn DocumentStore,
        names: &DisplayNameResolver,
        user_id: &str,
        id: &str,
        input: &UpdateActor,
    ) -> DbResult<Actor> {
        let existing: Actor = EntityReader::find_viewable(store, id, user_id).await?;
        ensure_can_mutate(user_id, &existing)?;
        require_text_if_present("name", input.name.as_deref())?;

        let actor: Actor = EntityReader::patch(store, id, input).await?;
        if input.name.is_some() {
            names.invalidate().await;
        }
        Ok(actor)
    }
}
