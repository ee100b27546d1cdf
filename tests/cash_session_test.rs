//! Cash register session lifecycle.

mod common;

use axum::http::Method;
use common::{response_json, TestApp};
use serde_json::json;

#[tokio::test]
async fn open_and_close_session() {
    let app = TestApp::new().await;

    let session_id = app.open_cash_session("500").await;

    let response = app
        .request_authenticated(Method::GET, "/api/v1/cash-sessions/active", None)
        .await;
    assert_eq!(response.status(), 200);
    let active = response_json(response).await;
    assert_eq!(active["id"].as_str(), Some(session_id.to_string().as_str()));
    assert_eq!(active["opening_amount"].as_str(), Some("500"));

    let response = app
        .request_authenticated(
            Method::POST,
            &format!("/api/v1/cash-sessions/{}/close", session_id),
            None,
        )
        .await;
    assert_eq!(response.status(), 200);
    let closed = response_json(response).await;
    assert!(closed["closed_at"].as_str().is_some());

    let response = app
        .request_authenticated(Method::GET, "/api/v1/cash-sessions/active", None)
        .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn second_open_session_for_same_user_conflicts() {
    let app = TestApp::new().await;
    app.open_cash_session("100").await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/cash-sessions",
            Some(json!({ "opening_amount": "200" })),
        )
        .await;
    assert_eq!(response.status(), 409);
}

#[tokio::test]
async fn negative_opening_amount_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/cash-sessions",
            Some(json!({ "opening_amount": "-50" })),
        )
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn closing_twice_is_invalid() {
    let app = TestApp::new().await;
    let session_id = app.open_cash_session("300").await;

    let response = app
        .request_authenticated(
            Method::POST,
            &format!("/api/v1/cash-sessions/{}/close", session_id),
            None,
        )
        .await;
    assert_eq!(response.status(), 200);

    let response = app
        .request_authenticated(
            Method::POST,
            &format!("/api/v1/cash-sessions/{}/close", session_id),
            None,
        )
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn session_history_is_listed() {
    let app = TestApp::new().await;
    let first = app.open_cash_session("100").await;
    let response = app
        .request_authenticated(
            Method::POST,
            &format!("/api/v1/cash-sessions/{}/close", first),
            None,
        )
        .await;
    assert_eq!(response.status(), 200);
    app.open_cash_session("150").await;

    let response = app
        .request_authenticated(Method::GET, "/api/v1/cash-sessions", None)
        .await;
    let page = response_json(response).await;
    assert_eq!(page["total"].as_u64(), Some(2));
}
