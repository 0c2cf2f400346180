//! Integration tests for list pages served by the entity reader.
//!
//! Exercises the full path (one store query, then in-memory refinement)
//! against the in-memory store:
//! - Unpublished or hidden records never appear
//! - Ordering is newest first with a stable tie order
//! - Cursors resume where the previous page stopped
//! - Malformed documents are skipped, store failures surface

mod common;

use assert_matches::assert_matches;
use common::{seed, ts};
use indiereel_core::entities::actor::Actor;
use indiereel_core::entities::movie::Movie;
use indiereel_core::error::CoreError;
use indiereel_core::refine::ListQuery;
use indiereel_db::reader::EntityReader;
use indiereel_db::repositories::{ActorRepo, MovieRepo};
use indiereel_db::store::MemoryDocumentStore;
use indiereel_db::DbError;
use serde_json::json;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_movie(store: &MemoryDocumentStore, id: &str, created_ms: i64, published: bool) {
    seed(
        store,
        "movies",
        id,
        json!({
            "title": format!("Movie {id}"),
            "genre": "drama",
            "filmmakerId": "f1",
            "isPublished": published,
            "createdAt": ts(created_ms),
        }),
    )
    .await;
}

fn ids(movies: &[Movie]) -> Vec<&str> {
    movies.iter().map(|m| m.id.as_str()).collect()
}

// ---------------------------------------------------------------------------
// Test: newest published movies first, unpublished excluded
// ---------------------------------------------------------------------------

#[tokio::test]
async fn lists_newest_published_movies_first() {
    let store = MemoryDocumentStore::new();
    seed_movie(&store, "t1", 1, true).await;
    seed_movie(&store, "t2", 2, true).await;
    seed_movie(&store, "t3", 3, true).await;
    seed_movie(&store, "t4", 4, false).await;

    let page = MovieRepo::list(&store, &ListQuery::new().limit(2)).await.unwrap();

    assert_eq!(ids(&page.items), vec!["t3", "t2"]);
    assert!(page.next_cursor.is_some());
}

// ---------------------------------------------------------------------------
// Test: following the cursor yields the rest
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cursor_resumes_after_last_item() {
    let store = MemoryDocumentStore::new();
    for (id, ms) in [("a", 10), ("b", 20), ("c", 30), ("d", 40), ("e", 50)] {
        seed_movie(&store, id, ms, true).await;
    }

    let first = MovieRepo::list(&store, &ListQuery::new().limit(2)).await.unwrap();
    assert_eq!(ids(&first.items), vec!["e", "d"]);

    let cursor = first.next_cursor.unwrap();
    let second = MovieRepo::list(&store, &ListQuery::new().limit(2).after(cursor))
        .await
        .unwrap();
    assert_eq!(ids(&second.items), vec!["c", "b"]);

    let third = MovieRepo::list(&store, &ListQuery::new().limit(2).after(second.next_cursor.unwrap()))
        .await
        .unwrap();
    assert_eq!(ids(&third.items), vec!["a"]);
    assert_eq!(third.next_cursor, None);
}

// ---------------------------------------------------------------------------
// Test: cursor record removed between pages
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cursor_survives_deleted_anchor() {
    use indiereel_db::store::DocumentStore;

    let store = MemoryDocumentStore::new();
    for (id, ms) in [("a", 10), ("b", 20), ("c", 30), ("d", 40)] {
        seed_movie(&store, id, ms, true).await;
    }

    let first = MovieRepo::list(&store, &ListQuery::new().limit(2)).await.unwrap();
    assert_eq!(ids(&first.items), vec!["d", "c"]);

    store.delete("movies", "c").await.unwrap();

    let second = MovieRepo::list(&store, &ListQuery::new().limit(2).after(first.next_cursor.unwrap()))
        .await
        .unwrap();
    assert_eq!(ids(&second.items), vec!["b", "a"]);
}

// ---------------------------------------------------------------------------
// Test: malformed cursor is rejected
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_cursor_is_a_validation_error() {
    let store = MemoryDocumentStore::new();
    let result = MovieRepo::list(&store, &ListQuery::new().after("not-a-cursor")).await;
    assert_matches!(result, Err(DbError::Core(CoreError::Validation(_))));
}

// ---------------------------------------------------------------------------
// Test: equal timestamps keep retrieval order
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_timestamps_keep_insertion_order() {
    let store = MemoryDocumentStore::new();
    for id in ["first", "second", "third"] {
        seed(
            &store,
            "movies",
            id,
            json!({"title": id, "isPublished": true, "filmmakerId": "f1"}),
        )
        .await;
    }

    let page = MovieRepo::list(&store, &ListQuery::new()).await.unwrap();
    assert_eq!(ids(&page.items), vec!["first", "second", "third"]);
}

// ---------------------------------------------------------------------------
// Test: visibility flag must be strictly true
// ---------------------------------------------------------------------------

#[tokio::test]
async fn non_boolean_visibility_is_hidden() {
    let store = MemoryDocumentStore::new();
    seed(
        &store,
        "actors",
        "strict",
        json!({"userId": "u1", "name": "Dana", "isPublic": true, "createdAt": ts(1)}),
    )
    .await;
    seed(
        &store,
        "actors",
        "stringly",
        json!({"userId": "u2", "name": "Eli", "isPublic": "true", "createdAt": ts(2)}),
    )
    .await;
    seed(
        &store,
        "actors",
        "private",
        json!({"userId": "u3", "name": "Fay", "isPublic": false, "createdAt": ts(3)}),
    )
    .await;

    let page = ActorRepo::list(&store, &ListQuery::new()).await.unwrap();
    let names: Vec<_> = page.items.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(names, vec!["strict"]);
}

// ---------------------------------------------------------------------------
// Test: records missing display fields are dropped
// ---------------------------------------------------------------------------

#[tokio::test]
async fn incomplete_records_are_dropped() {
    let store = MemoryDocumentStore::new();
    seed(&store, "actors", "named", json!({"name": "Dana", "isPublic": true, "createdAt": ts(1)})).await;
    seed(&store, "actors", "nameless", json!({"isPublic": true, "createdAt": ts(2)})).await;
    seed(&store, "actors", "undated", json!({"name": "Eli", "isPublic": true})).await;

    let page = ActorRepo::list(&store, &ListQuery::new()).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, "named");
}

// ---------------------------------------------------------------------------
// Test: search and filters
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_ignores_case() {
    let store = MemoryDocumentStore::new();
    seed(
        &store,
        "actors",
        "a1",
        json!({"name": "Marisol Vega", "isPublic": true, "createdAt": ts(1)}),
    )
    .await;
    seed(
        &store,
        "actors",
        "a2",
        json!({"name": "Tom Reed", "isPublic": true, "createdAt": ts(2)}),
    )
    .await;

    let page = ActorRepo::list(&store, &ListQuery::new().search("VEGA")).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].name.as_deref(), Some("Marisol Vega"));
}

#[tokio::test]
async fn server_and_client_filters_combine() {
    let store = MemoryDocumentStore::new();
    seed(
        &store,
        "actors",
        "a1",
        json!({"name": "A", "location": "Austin", "skills": ["stunts"], "isPublic": true, "createdAt": ts(1)}),
    )
    .await;
    seed(
        &store,
        "actors",
        "a2",
        json!({"name": "B", "location": "Austin", "skills": ["singing"], "isPublic": true, "createdAt": ts(2)}),
    )
    .await;
    seed(
        &store,
        "actors",
        "a3",
        json!({"name": "C", "location": "Denver", "skills": ["stunts"], "isPublic": true, "createdAt": ts(3)}),
    )
    .await;

    let query = ListQuery::new()
        .filter("location", "Austin")
        .filter("skills", "stunts");
    let page: indiereel_core::refine::Page<Actor> = EntityReader::list(&store, &query).await.unwrap();
    let found: Vec<_> = page.items.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(found, vec!["a1"]);
}

#[tokio::test]
async fn unknown_filter_field_is_rejected() {
    let store = MemoryDocumentStore::new();
    let result = MovieRepo::list(&store, &ListQuery::new().filter("budget", "1000")).await;
    assert_matches!(result, Err(DbError::Core(CoreError::Validation(msg))) if msg.contains("genre"));
}

// ---------------------------------------------------------------------------
// Test: malformed documents and store failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_documents_are_skipped() {
    let store = MemoryDocumentStore::new();
    seed_movie(&store, "good", 1, true).await;
    seed(
        &store,
        "movies",
        "bad",
        json!({"title": 42, "isPublished": true, "createdAt": ts(2)}),
    )
    .await;

    let page = MovieRepo::list(&store, &ListQuery::new()).await.unwrap();
    assert_eq!(ids(&page.items), vec!["good"]);
}

#[tokio::test]
async fn store_failure_surfaces_as_error() {
    let store = MemoryDocumentStore::new();
    seed_movie(&store, "m1", 1, true).await;
    store.set_unavailable("movies", true).await;

    let result = MovieRepo::list(&store, &ListQuery::new()).await;
    assert_matches!(result, Err(DbError::Store(_)));
}

// ---------------------------------------------------------------------------
// Test: hidden records look missing to everyone but their owner
// ---------------------------------------------------------------------------

#[tokio::test]
async fn drafts_are_visible_only_to_their_owner() {
    let store = MemoryDocumentStore::new();
    seed_movie(&store, "draft", 1, false).await;

    assert!(MovieRepo::get(&store, "draft", "f1").await.is_ok());
    assert_matches!(
        MovieRepo::get(&store, "draft", "someone-else").await,
        Err(DbError::Core(CoreError::NotFound { entity: "Movie", .. }))
    );
}
