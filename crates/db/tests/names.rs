//! Integration tests for the cached display-name resolver.

mod common;

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use common::{seed, ts};
use indiereel_core::cache::{FixedTtl, ManualClock};
use indiereel_core::entities::user::UpsertUserProfile;
use indiereel_db::names::{DisplayNameResolver, NAME_CACHE_TTL_SECS};
use indiereel_db::repositories::UserRepo;
use indiereel_db::store::MemoryDocumentStore;
use serde_json::json;

fn resolver_with_clock() -> (DisplayNameResolver, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(Utc.timestamp_opt(1_700_000_000, 0).unwrap()));
    let resolver = DisplayNameResolver::with_policy(
        FixedTtl::new(Duration::seconds(NAME_CACHE_TTL_SECS)),
        clock.clone(),
    );
    (resolver, clock)
}

// ---------------------------------------------------------------------------
// Label resolution
// ---------------------------------------------------------------------------

#[tokio::test]
async fn role_profile_name_takes_priority() {
    let store = MemoryDocumentStore::new();
    seed(&store, "users", "u1", json!({"displayName": "dana99", "createdAt": ts(1)})).await;
    seed(&store, "actors", "a1", json!({"userId": "u1", "name": "Dana Fox", "isPublic": false})).await;

    let names = DisplayNameResolver::default();
    assert_eq!(names.display_name(&store, "u1").await, "Dana Fox");
}

#[tokio::test]
async fn email_and_id_fallbacks() {
    let store = MemoryDocumentStore::new();
    seed(&store, "users", "u1", json!({"email": "reel.maker@example.com"})).await;
    seed(&store, "users", "abcdefghijkl", json!({})).await;

    let names = DisplayNameResolver::default();
    assert_eq!(names.display_name(&store, "u1").await, "reel.maker");
    assert_eq!(names.display_name(&store, "abcdefghijkl").await, "abcdefgh");
}

#[tokio::test]
async fn unknown_user_gets_truncated_id() {
    let store = MemoryDocumentStore::new();
    let names = DisplayNameResolver::default();
    assert_eq!(names.display_name(&store, "zzzzzzzzzzzz").await, "zzzzzzzz");
}

#[tokio::test]
async fn role_profile_failure_falls_back_down_the_chain() {
    let store = MemoryDocumentStore::new();
    seed(&store, "users", "u1", json!({"displayName": "dana99"})).await;
    seed(&store, "actors", "a1", json!({"userId": "u1", "name": "Dana Fox"})).await;
    store.set_unavailable("actors", true).await;

    let names = DisplayNameResolver::default();
    assert_eq!(names.display_name(&store, "u1").await, "dana99");
}

// ---------------------------------------------------------------------------
// Disambiguation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn shared_names_get_suffixes_by_account_age() {
    let store = MemoryDocumentStore::new();
    seed(&store, "users", "young", json!({"displayName": "Sam Lee", "createdAt": ts(300)})).await;
    seed(&store, "users", "old", json!({"displayName": "Sam Lee", "createdAt": ts(100)})).await;
    seed(&store, "users", "solo", json!({"displayName": "Ira Gold", "createdAt": ts(200)})).await;

    let names = DisplayNameResolver::default();
    assert_eq!(names.display_name(&store, "old").await, "Sam Lee A");
    assert_eq!(names.display_name(&store, "young").await, "Sam Lee B");
    assert_eq!(names.display_name(&store, "solo").await, "Ira Gold");
}

// ---------------------------------------------------------------------------
// Caching
// ---------------------------------------------------------------------------

#[tokio::test]
async fn index_is_cached_until_ttl_expires() {
    let store = MemoryDocumentStore::new();
    seed(&store, "users", "u1", json!({"displayName": "Sam", "createdAt": ts(1)})).await;
    let (names, clock) = resolver_with_clock();

    assert_eq!(names.display_name(&store, "u1").await, "Sam");

    // A write made behind the resolver's back.
    seed(&store, "users", "u2", json!({"displayName": "Sam", "createdAt": ts(2)})).await;

    clock.advance(Duration::minutes(9));
    assert_eq!(names.display_name(&store, "u1").await, "Sam");

    clock.advance(Duration::minutes(1));
    assert_eq!(names.display_name(&store, "u1").await, "Sam A");
    assert_eq!(names.display_name(&store, "u2").await, "Sam B");
}

#[tokio::test]
async fn profile_writes_invalidate_the_index() {
    let store = MemoryDocumentStore::new();
    seed(&store, "users", "u1", json!({"displayName": "Sam", "createdAt": ts(1)})).await;
    let (names, _clock) = resolver_with_clock();

    assert_eq!(names.display_name(&store, "u1").await, "Sam");

    let input = UpsertUserProfile {
        display_name: Some("Sam".into()),
        ..UpsertUserProfile::default()
    };
    UserRepo::upsert_me(&store, &names, "u2", &input).await.unwrap();

    assert_eq!(names.display_name(&store, "u1").await, "Sam A");
    assert_eq!(names.display_name(&store, "u2").await, "Sam B");
}

#[tokio::test]
async fn users_missing_from_the_index_resolve_directly() {
    let store = MemoryDocumentStore::new();
    let (names, _clock) = resolver_with_clock();
    names.index(&store).await.unwrap();

    seed(&store, "users", "late", json!({"displayName": "Newcomer"})).await;
    assert_eq!(names.display_name(&store, "late").await, "Newcomer");
}
