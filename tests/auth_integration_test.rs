//! Registration, login, token refresh, logout and tenant isolation.

mod common;

use axum::http::Method;
use common::{response_json, TestApp};
use serde_json::json;

#[tokio::test]
async fn register_returns_session_with_tokens() {
    let mut app = TestApp::new().await;

    let session = app
        .register_owner("Ana", "ana@example.com", "clave-segura")
        .await;
    assert!(session["access_token"].as_str().is_some());
    assert!(session["refresh_token"].as_str().is_some());
    assert_eq!(session["user"]["email"].as_str(), Some("ana@example.com"));
}

#[tokio::test]
async fn duplicate_email_conflicts_with_friendly_message() {
    let app = TestApp::new().await;

    // The harness already registered owner@example.com.
    let response = app
        .request(
            Method::POST,
            "/auth/register",
            Some(json!({
                "name": "Otro",
                "email": "owner@example.com",
                "password": "otra-clave"
            })),
            None,
        )
        .await;
    assert_eq!(response.status(), 409);
    let body = response_json(response).await;
    assert_eq!(
        body["error"]["message"].as_str(),
        Some("This email is already registered. Please sign in.")
    );
}

#[tokio::test]
async fn short_password_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/auth/register",
            Some(json!({
                "name": "Corta",
                "email": "corta@example.com",
                "password": "abc"
            })),
            None,
        )
        .await;
    assert_eq!(response.status(), 400);
    let body = response_json(response).await;
    assert_eq!(
        body["error"]["message"].as_str(),
        Some("Password must be at least 6 characters.")
    );
}

#[tokio::test]
async fn login_uses_one_message_for_unknown_email_and_bad_password() {
    let app = TestApp::new().await;

    let wrong_password = app
        .request(
            Method::POST,
            "/auth/login",
            Some(json!({ "email": "owner@example.com", "password": "equivocada" })),
            None,
        )
        .await;
    assert_eq!(wrong_password.status(), 401);
    let wrong_password = response_json(wrong_password).await;

    let unknown_email = app
        .request(
            Method::POST,
            "/auth/login",
            Some(json!({ "email": "nadie@example.com", "password": "loquesea" })),
            None,
        )
        .await;
    assert_eq!(unknown_email.status(), 401);
    let unknown_email = response_json(unknown_email).await;

    assert_eq!(
        wrong_password["error"]["message"],
        unknown_email["error"]["message"]
    );
    assert_eq!(
        wrong_password["error"]["message"].as_str(),
        Some("Invalid email or password.")
    );
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let app = TestApp::new().await;

    let response = app
        .request(Method::GET, "/api/v1/inventory", None, None)
        .await;
    assert_eq!(response.status(), 401);

    let response = app
        .request(Method::GET, "/api/v1/inventory", None, Some("garbage-token"))
        .await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn refresh_rotates_the_token_pair() {
    let mut app = TestApp::new().await;
    let session = app
        .register_owner("Rot", "rot@example.com", "clave-segura")
        .await;
    let refresh_token = session["refresh_token"].as_str().unwrap().to_string();

    let response = app
        .request(
            Method::POST,
            "/auth/refresh",
            Some(json!({ "refresh_token": refresh_token })),
            None,
        )
        .await;
    assert_eq!(response.status(), 200);
    let rotated = response_json(response).await;
    let new_access = rotated["access_token"].as_str().unwrap();
    assert_ne!(new_access, session["access_token"].as_str().unwrap());

    // Old refresh token was revoked by rotation.
    let response = app
        .request(
            Method::POST,
            "/auth/refresh",
            Some(json!({ "refresh_token": refresh_token })),
            None,
        )
        .await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn me_returns_profile_for_valid_token() {
    let app = TestApp::new().await;

    let response = app
        .request_authenticated(Method::GET, "/auth/me", None)
        .await;
    assert_eq!(response.status(), 200);
    let profile = response_json(response).await;
    assert_eq!(profile["email"].as_str(), Some("owner@example.com"));
}

#[tokio::test]
async fn logout_revokes_the_access_token() {
    let app = TestApp::new().await;

    let response = app
        .request_authenticated(Method::POST, "/auth/logout", None)
        .await;
    assert_eq!(response.status(), 200);

    let response = app
        .request_authenticated(Method::GET, "/auth/me", None)
        .await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn tenants_cannot_see_each_other() {
    let mut app = TestApp::new().await;
    let item = app.seed_item("Secreto", "SEC-001", "1", "100").await;

    // Registering switches the harness to a second tenant.
    app.register_owner("Vecino", "vecino@example.com", "clave-segura")
        .await;

    let response = app
        .request_authenticated(Method::GET, "/api/v1/inventory", None)
        .await;
    let page = response_json(response).await;
    assert_eq!(page["total"].as_u64(), Some(0));

    let response = app
        .request_authenticated(
            Method::GET,
            &format!("/api/v1/inventory/{}", item["id"].as_str().unwrap()),
            None,
        )
        .await;
    assert_eq!(response.status(), 404);
}
