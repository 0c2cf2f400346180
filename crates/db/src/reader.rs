//! Generic typed reads over the document store.
//!
//! A list page costs exactly one store query: the entity's visibility
//! predicate plus, at most, the caller's filter on the entity's server-side
//! field. Everything else (remaining filters, search, ordering, cursor) is
//! applied in memory by [`indiereel_core::refine`].

use indiereel_core::access::Owned;
use indiereel_core::entity::Entity;
use indiereel_core::error::CoreError;
use indiereel_core::refine::{refine, ListQuery, Page};
use serde::Serialize;
use serde_json::Value;

use crate::error::DbResult;
use crate::store::{to_data, Document, DocumentStore, Predicate};

/// Typed read/write helpers shared by every repository.
pub struct EntityReader;

impl EntityReader {
    /// Store-side predicates for one list page of `T`.
    pub fn predicates_for<T: Entity>(query: &ListQuery) -> Vec<Predicate> {
        let mut predicates = Vec::with_capacity(2);
        if let Some(field) = T::VISIBILITY_FIELD {
            predicates.push(Predicate::eq(field, true));
        }
        if let Some(filter) = query.server_filter::<T>() {
            predicates.push(Predicate::eq(
                filter.field.clone(),
                Value::String(filter.value.clone()),
            ));
        }
        predicates
    }

    /// Query and decode. Documents that do not decode as `T` are skipped.
    pub async fn fetch<T: Entity>(
        store: &dyn DocumentStore,
        predicates: &[Predicate],
    ) -> DbResult<Vec<T>> {
        let docs = store.query(T::COLLECTION, predicates).await?;
        Ok(decode_all(docs))
    }

    /// One refined page of `T`.
    pub async fn list<T: Entity>(store: &dyn DocumentStore, query: &ListQuery) -> DbResult<Page<T>> {
        query.validate_for::<T>()?;
        let predicates = Self::predicates_for::<T>(query);
        let records = Self::fetch::<T>(store, &predicates).await?;
        Ok(refine(records, query)?)
    }

    /// Like [`EntityReader::list`], with an extra store-side scope such as
    /// "addressed to me".
    pub async fn list_scoped<T: Entity>(
        store: &dyn DocumentStore,
        scope: Predicate,
        query: &ListQuery,
    ) -> DbResult<Page<T>> {
        query.validate_for::<T>()?;
        let mut predicates = Self::predicates_for::<T>(query);
        predicates.push(scope);
        let records = Self::fetch::<T>(store, &predicates).await?;
        Ok(refine(records, query)?)
    }

    pub async fn find<T: Entity>(store: &dyn DocumentStore, id: &str) -> DbResult<Option<T>> {
        match store.get(T::COLLECTION, id).await? {
            Some(doc) => Ok(Some(doc.decode()?)),
            None => Ok(None),
        }
    }

    /// Like [`EntityReader::find`], failing with `NotFound` when missing.
    pub async fn find_required<T: Entity>(store: &dyn DocumentStore, id: &str) -> DbResult<T> {
        Self::find(store, id).await?.ok_or_else(|| not_found::<T>(id))
    }

    /// A record the viewer may see: visible to everyone, or owned by the
    /// viewer. Hidden records look exactly like missing ones.
    pub async fn find_viewable<T: Entity + Owned>(
        store: &dyn DocumentStore,
        id: &str,
        viewer: &str,
    ) -> DbResult<T> {
        let record: T = Self::find_required(store, id).await?;
        if record.is_visible() || record.owner_id() == Some(viewer) {
            Ok(record)
        } else {
            Err(not_found::<T>(id))
        }
    }

    /// Insert a new record. The store assigns the id and timestamps.
    pub async fn create<T: Entity>(store: &dyn DocumentStore, record: &T) -> DbResult<T> {
        let doc = store.insert(T::COLLECTION, to_data(record)?).await?;
        Ok(doc.decode()?)
    }

    /// Merge a partial update into an existing record.
    pub async fn patch<T: Entity, P: Serialize>(
        store: &dyn DocumentStore,
        id: &str,
        patch: &P,
    ) -> DbResult<T> {
        let doc = store
            .update(T::COLLECTION, id, to_data(patch)?)
            .await?
            .ok_or_else(|| not_found::<T>(id))?;
        Ok(doc.decode()?)
    }
}

fn not_found<T: Entity>(id: &str) -> crate::DbError {
    CoreError::NotFound {
        entity: T::NAME,
        id: id.to_string(),
    }
    .into()
}

fn decode_all<T: Entity>(docs: Vec<Document>) -> Vec<T> {
    docs.into_iter()
        .filter_map(|doc| {
            let id = doc.id.clone();
            match doc.decode::<T>() {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(
                        collection = T::COLLECTION,
                        doc_id = %id,
                        error = %e,
                        "Skipping malformed document",
                    );
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use indiereel_core::entities::actor::Actor;
    use indiereel_core::entities::rating::MovieRating;
    use indiereel_core::entities::request::Request;

    use super::*;

    #[test]
    fn visibility_and_server_filter_are_pushed_down() {
        let query = ListQuery::new()
            .filter("skills", "stunts")
            .filter("location", "Austin");
        let predicates = EntityReader::predicates_for::<Actor>(&query);
        assert_eq!(
            predicates,
            vec![
                Predicate::eq("isPublic", true),
                Predicate::eq("location", "Austin"),
            ]
        );
    }

    #[test]
    fn only_the_server_field_is_pushed_down() {
        let query = ListQuery::new().filter("skills", "stunts");
        let predicates = EntityReader::predicates_for::<Actor>(&query);
        assert_eq!(predicates, vec![Predicate::eq("isPublic", true)]);
    }

    #[test]
    fn entities_without_visibility_field_push_nothing_by_default() {
        assert!(EntityReader::predicates_for::<Request>(&ListQuery::new()).is_empty());
        let query = ListQuery::new().filter("movieId", "m1");
        assert_eq!(
            EntityReader::predicates_for::<MovieRating>(&query),
            vec![Predicate::eq("movieId", "m1")]
        );
    }
}
