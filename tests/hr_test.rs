//! Staff directory backed by seeded fixture data.

mod common;

use axum::http::Method;
use common::{response_json, TestApp};

#[tokio::test]
async fn seeding_the_roster_is_idempotent() {
    let app = TestApp::new().await;

    let response = app
        .request_authenticated(Method::GET, "/api/v1/hr/employees", None)
        .await;
    assert_eq!(response.status(), 200);
    assert_eq!(response_json(response).await.as_array().unwrap().len(), 0);

    let response = app
        .request_authenticated(Method::POST, "/api/v1/hr/employees/seed", None)
        .await;
    assert_eq!(response.status(), 200);
    let roster = response_json(response).await;
    let employees = roster.as_array().unwrap();
    assert_eq!(employees.len(), 4);
    assert!(employees.iter().any(|e| e["status"] == "active"));
    assert!(employees.iter().any(|e| e["status"] == "pending"));

    let response = app
        .request_authenticated(Method::POST, "/api/v1/hr/employees/seed", None)
        .await;
    assert_eq!(response_json(response).await.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn roster_is_listed_by_name() {
    let app = TestApp::new().await;
    let response = app
        .request_authenticated(Method::POST, "/api/v1/hr/employees/seed", None)
        .await;
    assert_eq!(response.status(), 200);

    let response = app
        .request_authenticated(Method::GET, "/api/v1/hr/employees", None)
        .await;
    let listed = response_json(response).await;
    let names: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["name"].as_str())
        .collect();
    assert_eq!(names[0], "Ana Rodriguez");
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
}
