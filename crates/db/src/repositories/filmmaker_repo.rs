//! Repository for the `filmmakers` collection.

use indiereel_core::access::ensure_can_mutate;
use indiereel_core::entities::filmmaker::{CreateFilmmaker, Filmmaker, UpdateFilmmaker};
use indiereel_core::error::CoreError;
use indiereel_core::refine::{ListQuery, Page};

use super::{require_text, require_text_if_present};
use crate::error::DbResult;
use crate::names::DisplayNameResolver;
use crate::reader::EntityReader;
use crate::store::{DocumentStore, Predicate};

pub struct FilmmakerRepo;

impl FilmmakerRepo {
    pub async fn list(store: &dyn DocumentStore, query: &ListQuery) -> DbResult<Page<Filmmaker>> {
        EntityReader::list(store, query).await
    }

    pub async fn get(store: &dyn DocumentStore, id: &str, viewer: &str) -> DbResult<Filmmaker> {
        EntityReader::find_viewable(store, id, viewer).await
    }

    /// The filmmaker profile owned by `user_id`, public or not.
    pub async fn find_by_user(
        store: &dyn DocumentStore,
        user_id: &str,
    ) -> DbResult<Option<Filmmaker>> {
        let filmmakers: Vec<Filmmaker> =
            EntityReader::fetch(store, &[Predicate::eq("userId", user_id)]).await?;
        Ok(filmmakers.into_iter().next())
    }

    pub async fn create(
        store: &dyn DocumentStore,
        names: &DisplayNameResolver,
        user_id: &str,
        input: CreateFilmmaker,
    ) -> DbResult<Filmmaker> {
        require_text("name", &input.name)?;
        if Self::find_by_user(store, user_id).await?.is_some() {
            return Err(CoreError::Conflict("You already have a filmmaker profile".into()).into());
        }

        let filmmaker = EntityReader::create(store, &input.into_filmmaker(user_id)).await?;
        names.invalidate().await;
        Ok(filmmaker)
    }

    pub async fn update(
        store: &dyn DocumentStore,
        names: &DisplayNameResolver,
        user_id: &str,
        id: &str,
        input: &UpdateFilmmaker,
    ) -> DbResult<Filmmaker> {
        let existing: Filmmaker = EntityReader::find_viewable(store, id, user_id).await?;
        ensure_can_mutate(user_id, &existing)?;
        require_text_if_present("name", input.name.as_deref())?;

        let filmmaker: Filmmaker = EntityReader::patch(store, id, input).await?;
        if input.name.is_some() {
            names.invalidate().await;
        }
        Ok(filmmaker)
    }
}
