//! HTTP tests that never reach the database.
//!
//! The router runs on a lazily-connected pool pointing at a closed port, so
//! every request here must be answered by routing, an extractor, or request
//! validation. Anything that tried to query would surface as a 500.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, get, get_auth, lazy_pool, post_json, post_json_auth, put_json_auth,
    user_token,
};

// ---------------------------------------------------------------------------
// General HTTP behaviour
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_degraded_without_database() {
    let app = common::build_test_app(lazy_pool());
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], false);
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = common::build_test_app(lazy_pool());
    let response = get(app, "/api/v1/directors").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn response_carries_request_id() {
    let app = common::build_test_app(lazy_pool());
    let response = get(app, "/api/v1/nothing-here").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("x-request-id header must be set")
        .to_str()
        .unwrap();
    assert_eq!(request_id.len(), 36);
}

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

#[tokio::test]
async fn admin_route_without_token_returns_401() {
    let app = common::build_test_app(lazy_pool());
    let response = post_json(app, "/api/v1/actors", serde_json::json!({})).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Missing Authorization header");
}

#[tokio::test]
async fn garbage_token_returns_401() {
    let app = common::build_test_app(lazy_pool());
    let response = get_auth(app, "/api/v1/users/profile", "not-a-jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid or expired token");
}

#[tokio::test]
async fn rating_lookup_requires_login() {
    let app = common::build_test_app(lazy_pool());
    let response = get(app, "/api/v1/ratings/1").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_requires_login() {
    let app = common::build_test_app(lazy_pool());
    let response = post_json(app, "/api/v1/auth/logout", serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Role checks
// ---------------------------------------------------------------------------

#[tokio::test]
async fn regular_user_cannot_create_movies() {
    let app = common::build_test_app(lazy_pool());
    let response =
        post_json_auth(app, "/api/v1/movies", serde_json::json!({}), &user_token(7)).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");
}

#[tokio::test]
async fn regular_user_cannot_list_users() {
    let app = common::build_test_app(lazy_pool());
    let response = get_auth(app, "/api/v1/users", &user_token(7)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn regular_user_cannot_read_raw_genre() {
    let app = common::build_test_app(lazy_pool());
    let response = get_auth(app, "/api/v1/genres/1", &user_token(7)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Path and body validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn non_numeric_id_returns_400() {
    let app = common::build_test_app(lazy_pool());
    let response = get_auth(app, "/api/v1/movies/not-an-id", &admin_token(1)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn actor_update_rejects_malformed_slug() {
    let app = common::build_test_app(lazy_pool());
    let response = put_json_auth(
        app,
        "/api/v1/actors/1",
        serde_json::json!({"name": "Keanu Reeves", "slug": "Keanu Reeves!"}),
        &admin_token(1),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("slug"));
}

#[tokio::test]
async fn genre_update_rejects_empty_name() {
    let app = common::build_test_app(lazy_pool());
    let response = put_json_auth(
        app,
        "/api/v1/genres/1",
        serde_json::json!({"name": "", "slug": "drama"}),
        &admin_token(1),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("name"));
}

#[tokio::test]
async fn movie_update_rejects_impossible_year() {
    let app = common::build_test_app(lazy_pool());
    let response = put_json_auth(
        app,
        "/api/v1/movies/1",
        serde_json::json!({
            "title": "Metropolis",
            "slug": "metropolis",
            "parameters": {"year": 1500, "duration": 153, "country": "Germany"}
        }),
        &admin_token(1),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn rating_outside_range_returns_400() {
    let app = common::build_test_app(lazy_pool());
    let response = post_json_auth(
        app,
        "/api/v1/ratings/set-rating",
        serde_json::json!({"movie_id": 1, "value": 6}),
        &user_token(3),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Rating must be between 1 and 5, got 6");
}

#[tokio::test]
async fn register_rejects_bad_email_and_short_password() {
    let app = common::build_test_app(lazy_pool());
    let response = post_json(
        app,
        "/api/v1/auth/register",
        serde_json::json!({"email": "not-an-email", "password": "123"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    let message = json["error"].as_str().unwrap();
    assert!(message.contains("email"));
    assert!(message.contains("password"));
}

#[tokio::test]
async fn profile_update_rejects_short_password() {
    let app = common::build_test_app(lazy_pool());
    let response = put_json_auth(
        app,
        "/api/v1/users/profile",
        serde_json::json!({"email": "neo@matrix.io", "password": "abc"}),
        &user_token(3),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
