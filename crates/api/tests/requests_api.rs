//! HTTP-level tests for collaboration requests and chat.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_as, post_json, put_json, seed, ts};
use serde_json::json;

async fn seed_people(store: &indiereel_db::store::MemoryDocumentStore) {
    seed(store, "users", "dir", json!({"displayName": "Mara", "createdAt": ts(100)})).await;
    seed(store, "actors", "act-doc", json!({"userId": "act", "name": "Lee Park", "isPublic": true, "createdAt": ts(200)})).await;
}

async fn send_request(app: axum::Router) -> String {
    let response = post_json(
        app,
        "/api/v1/requests",
        "dir",
        json!({"toUserId": "act", "kind": "casting", "message": "Audition Friday?"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Test: sending stamps both display names and lands in the right boxes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn request_appears_in_inbox_and_outbox() {
    let (app, store) = common::build_test_app();
    seed_people(&store).await;
    let id = send_request(app.clone()).await;

    let response = get_as(app.clone(), "/api/v1/requests", "act").await;
    let inbox = body_json(response).await;
    assert_eq!(inbox["data"][0]["id"], id.as_str());
    assert_eq!(inbox["data"][0]["fromName"], "Mara");
    assert_eq!(inbox["data"][0]["toName"], "Lee Park");
    assert_eq!(inbox["data"][0]["status"], "pending");

    let response = get_as(app.clone(), "/api/v1/requests?box=outbox", "dir").await;
    let outbox = body_json(response).await;
    assert_eq!(outbox["data"].as_array().unwrap().len(), 1);

    let response = get_as(app.clone(), "/api/v1/requests?box=outbox", "act").await;
    let empty = body_json(response).await;
    assert!(empty["data"].as_array().unwrap().is_empty());

    let response = get_as(app, "/api/v1/requests?box=spam", "act").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: outsiders cannot see a request
// ---------------------------------------------------------------------------

#[tokio::test]
async fn non_participant_gets_404() {
    let (app, store) = common::build_test_app();
    seed_people(&store).await;
    let id = send_request(app.clone()).await;

    let response = get_as(app, &format!("/api/v1/requests/{id}"), "stranger").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: only the recipient accepts, and only once
// ---------------------------------------------------------------------------

#[tokio::test]
async fn recipient_accepts_then_status_is_final() {
    let (app, store) = common::build_test_app();
    seed_people(&store).await;
    let id = send_request(app.clone()).await;
    let uri = format!("/api/v1/requests/{id}/status");

    let response = put_json(app.clone(), &uri, "dir", json!({"status": "accepted"})).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = put_json(app.clone(), &uri, "act", json!({"status": "accepted"})).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "accepted");

    let response = put_json(app, &uri, "dir", json!({"status": "withdrawn"})).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Test: chat opens once the request is accepted
// ---------------------------------------------------------------------------

#[tokio::test]
async fn chat_requires_accepted_request() {
    let (app, store) = common::build_test_app();
    seed_people(&store).await;
    let id = send_request(app.clone()).await;
    let uri = format!("/api/v1/requests/{id}/messages");

    let response = post_json(app.clone(), &uri, "dir", json!({"body": "Hello?"})).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    put_json(
        app.clone(),
        &format!("/api/v1/requests/{id}/status"),
        "act",
        json!({"status": "accepted"}),
    )
    .await;

    let response = post_json(app.clone(), &uri, "dir", json!({"body": "Great, 10am?"})).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let response = post_json(app.clone(), &uri, "act", json!({"body": "Works for me"})).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get_as(app.clone(), &uri, "act").await;
    let json = body_json(response).await;
    let bodies: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["body"].as_str().unwrap())
        .collect();
    assert_eq!(bodies, vec!["Great, 10am?", "Works for me"]);
    assert_eq!(json["data"][0]["senderName"], "Mara");

    let response = get_as(app, &uri, "stranger").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cannot_request_yourself() {
    let (app, _store) = common::build_test_app();

    let response = post_json(app, "/api/v1/requests", "dir", json!({"toUserId": "dir"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
