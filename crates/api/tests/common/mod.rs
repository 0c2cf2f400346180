#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::{SecondsFormat, TimeZone, Utc};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use indiereel_api::auth::jwt::{generate_access_token, JwtConfig};
use indiereel_api::config::{ServerConfig, StoreBackend};
use indiereel_api::router::build_app_router;
use indiereel_api::state::AppState;
use indiereel_db::names::DisplayNameResolver;
use indiereel_db::store::{Document, MemoryDocumentStore};

/// Build a test `ServerConfig` with safe defaults and the in-memory store.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        store_backend: StoreBackend::Memory,
        database_url: None,
        name_cache_ttl_secs: 600,
        jwt: JwtConfig {
            secret: "test-secret-for-integration-tests".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router over a fresh in-memory store.
///
/// The store is returned alongside the router so tests can seed documents
/// and inspect writes.
pub fn build_test_app() -> (Router, Arc<MemoryDocumentStore>) {
    let config = test_config();
    let store = Arc::new(MemoryDocumentStore::new());

    let state = AppState {
        store: store.clone(),
        config: Arc::new(config.clone()),
        names: Arc::new(DisplayNameResolver::default()),
    };

    (build_app_router(state, &config), store)
}

/// A valid Bearer token for `user_id`.
pub fn token(user_id: &str) -> String {
    generate_access_token(user_id, &test_config().jwt).unwrap()
}

/// RFC 3339 timestamp `ms` milliseconds after the epoch.
pub fn ts(ms: i64) -> String {
    Utc.timestamp_millis_opt(ms)
        .unwrap()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Store a document verbatim under a fixed id.
pub async fn seed(store: &MemoryDocumentStore, collection: &str, id: &str, data: Value) {
    let data = data.as_object().cloned().expect("seed data must be an object");
    store
        .insert_raw(
            collection,
            Document {
                id: id.to_string(),
                data,
            },
        )
        .await;
}

async fn send(app: Router, method: Method, uri: &str, user: Option<&str>, body: Option<Value>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header("authorization", format!("Bearer {}", token(user)));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

/// Unauthenticated GET.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_as(app: Router, uri: &str, user: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(user), None).await
}

pub async fn post_json(app: Router, uri: &str, user: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(user), Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, user: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(user), Some(body)).await
}

pub async fn delete_as(app: Router, uri: &str, user: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(user), None).await
}

/// Collect the response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
