//! HTTP-level tests for rating a movie and keeping its summary current.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_as, get_as, post_json, put_json, seed, ts};
use serde_json::json;

async fn seed_movie(store: &indiereel_db::store::MemoryDocumentStore) {
    seed(
        store,
        "movies",
        "m1",
        json!({"title": "Dust", "filmmakerId": "f1", "isPublished": true, "createdAt": ts(1_000)}),
    )
    .await;
}

// ---------------------------------------------------------------------------
// Test: first rating creates, second replaces
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rating_twice_replaces_the_first() {
    let (app, store) = common::build_test_app();
    seed_movie(&store).await;

    let response = post_json(app.clone(), "/api/v1/movies/m1/ratings", "u1", json!({"rating": 3.0})).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let first = body_json(response).await;
    assert_eq!(first["data"]["movieTitle"], "Dust");

    let response = post_json(
        app.clone(),
        "/api/v1/movies/m1/ratings",
        "u1",
        json!({"rating": 5.0, "review": "Grew on me"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let second = body_json(response).await;
    assert_eq!(second["data"]["id"], first["data"]["id"]);

    let response = get_as(app, "/api/v1/movies/m1/rating", "u2").await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["averageRating"], 5.0);
    assert_eq!(json["data"]["ratingCount"], 1);
}

// ---------------------------------------------------------------------------
// Test: the movie document carries the denormalized summary
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rating_writes_back_movie_aggregate() {
    let (app, store) = common::build_test_app();
    seed_movie(&store).await;

    post_json(app.clone(), "/api/v1/movies/m1/ratings", "u1", json!({"rating": 2.0})).await;
    post_json(app.clone(), "/api/v1/movies/m1/ratings", "u2", json!({"rating": 4.0})).await;

    let response = get_as(app, "/api/v1/movies", "u3").await;
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["averageRating"], 3.0);
    assert_eq!(json["data"][0]["ratingCount"], 2);
}

// ---------------------------------------------------------------------------
// Test: soft delete removes the rating from lists and the average
// ---------------------------------------------------------------------------

#[tokio::test]
async fn deleted_rating_stops_counting() {
    let (app, store) = common::build_test_app();
    seed_movie(&store).await;

    let response = post_json(app.clone(), "/api/v1/movies/m1/ratings", "u1", json!({"rating": 1.0})).await;
    let id = body_json(response).await["data"]["id"].as_str().unwrap().to_string();
    post_json(app.clone(), "/api/v1/movies/m1/ratings", "u2", json!({"rating": 5.0})).await;

    let response = delete_as(app.clone(), &format!("/api/v1/ratings/{id}"), "u2").await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_as(app.clone(), &format!("/api/v1/ratings/{id}"), "u1").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_as(app.clone(), "/api/v1/movies/m1/ratings", "u3").await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let response = get_as(app.clone(), "/api/v1/movies/m1/rating", "u3").await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["averageRating"], 5.0);

    // Deleted ratings can no longer be edited.
    let response = put_json(app, &format!("/api/v1/ratings/{id}"), "u1", json!({"rating": 2.0})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn out_of_range_rating_is_rejected() {
    let (app, store) = common::build_test_app();
    seed_movie(&store).await;

    let response = post_json(app, "/api/v1/movies/m1/ratings", "u1", json!({"rating": 9.5})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn unrated_movie_summary_is_zero() {
    let (app, store) = common::build_test_app();
    seed_movie(&store).await;

    let response = get_as(app, "/api/v1/movies/m1/rating", "u1").await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["averageRating"], 0.0);
    assert_eq!(json["data"]["ratingCount"], 0);
}

#[tokio::test]
async fn summary_for_unknown_or_draft_movie_is_404() {
    let (app, store) = common::build_test_app();
    seed(&store, "movies", "draft", json!({"title": "Rough Cut", "filmmakerId": "f1", "isPublished": false, "createdAt": ts(1_000)})).await;

    let response = get_as(app.clone(), "/api/v1/movies/nope/rating", "u1").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_as(app.clone(), "/api/v1/movies/draft/rating", "u1").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_as(app, "/api/v1/movies/draft/rating", "f1").await;
    assert_eq!(response.status(), StatusCode::OK);
}
