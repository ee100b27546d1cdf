//! Delivery fleet simulation: fixtures, route assignment and stop
//! progression.

mod common;

use axum::http::Method;
use common::{response_json, TestApp};
use serde_json::{json, Value};

async fn seed_fleet(app: &TestApp) -> Vec<Value> {
    let response = app
        .request_authenticated(Method::POST, "/api/v1/logistics/drivers/seed", None)
        .await;
    assert_eq!(response.status(), 200);
    response_json(response).await.as_array().unwrap().clone()
}

async fn add_stop(app: &TestApp, address: &str, lat: f64, lng: f64) -> Value {
    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/logistics/stops",
            Some(json!({ "address": address, "latitude": lat, "longitude": lng })),
        )
        .await;
    assert_eq!(response.status(), 201);
    response_json(response).await
}

#[tokio::test]
async fn seeding_is_idempotent() {
    let app = TestApp::new().await;

    let first = seed_fleet(&app).await;
    assert_eq!(first.len(), 2);

    let second = seed_fleet(&app).await;
    assert_eq!(second.len(), 2);
    assert_eq!(first[0]["id"], second[0]["id"]);
}

#[tokio::test]
async fn route_assignment_orders_stops_nearest_first() {
    let app = TestApp::new().await;
    let drivers = seed_fleet(&app).await;
    // Carlos starts at the Obelisco (-34.6037, -58.3816).
    let carlos = drivers
        .iter()
        .find(|d| d["name"].as_str().unwrap_or_default().starts_with("Carlos"))
        .unwrap();

    // Far stop first so insertion order differs from travel order.
    add_stop(&app, "La Boca", -34.6345, -58.3631).await;
    add_stop(&app, "Teatro Colon", -34.6010, -58.3831).await;

    let response = app
        .request_authenticated(
            Method::POST,
            &format!(
                "/api/v1/logistics/drivers/{}/route",
                carlos["id"].as_str().unwrap()
            ),
            None,
        )
        .await;
    assert_eq!(response.status(), 200);
    let plan = response_json(response).await;
    let stops = plan["stops"].as_array().unwrap();
    assert_eq!(stops.len(), 2);
    assert_eq!(stops[0]["address"].as_str(), Some("Teatro Colon"));
    assert_eq!(stops[0]["route_position"].as_i64(), Some(0));
    assert_eq!(stops[0]["status"].as_str(), Some("in_progress"));
    assert_eq!(stops[1]["address"].as_str(), Some("La Boca"));
}

#[tokio::test]
async fn assignment_without_pending_stops_is_invalid() {
    let app = TestApp::new().await;
    let drivers = seed_fleet(&app).await;

    let response = app
        .request_authenticated(
            Method::POST,
            &format!(
                "/api/v1/logistics/drivers/{}/route",
                drivers[0]["id"].as_str().unwrap()
            ),
            None,
        )
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn stops_complete_in_route_order() {
    let app = TestApp::new().await;
    let drivers = seed_fleet(&app).await;
    let driver_id = drivers[0]["id"].as_str().unwrap().to_string();

    add_stop(&app, "Palermo", -34.5889, -58.4306).await;
    add_stop(&app, "Caballito", -34.6197, -58.4433).await;

    let response = app
        .request_authenticated(
            Method::POST,
            &format!("/api/v1/logistics/drivers/{}/route", driver_id),
            None,
        )
        .await;
    assert_eq!(response.status(), 200);

    let response = app
        .request_authenticated(
            Method::POST,
            &format!("/api/v1/logistics/drivers/{}/complete-stop", driver_id),
            None,
        )
        .await;
    assert_eq!(response.status(), 200);
    let plan = response_json(response).await;
    assert_eq!(plan["driver"]["current_stop_index"].as_i64(), Some(1));
    let completed: Vec<&str> = plan["stops"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|s| s["status"] == "completed")
        .filter_map(|s| s["address"].as_str())
        .collect();
    assert_eq!(completed.len(), 1);

    let response = app
        .request_authenticated(
            Method::POST,
            &format!("/api/v1/logistics/drivers/{}/complete-stop", driver_id),
            None,
        )
        .await;
    assert_eq!(response.status(), 200);

    // Route exhausted: nothing left to complete.
    let response = app
        .request_authenticated(
            Method::POST,
            &format!("/api/v1/logistics/drivers/{}/complete-stop", driver_id),
            None,
        )
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn movement_toggle_requires_a_route_in_progress() {
    let app = TestApp::new().await;
    let drivers = seed_fleet(&app).await;
    let driver_id = drivers[0]["id"].as_str().unwrap().to_string();

    let response = app
        .request_authenticated(
            Method::POST,
            &format!("/api/v1/logistics/drivers/{}/toggle-movement", driver_id),
            None,
        )
        .await;
    assert_eq!(response.status(), 400);

    add_stop(&app, "Flores", -34.6282, -58.4636).await;
    let response = app
        .request_authenticated(
            Method::POST,
            &format!("/api/v1/logistics/drivers/{}/route", driver_id),
            None,
        )
        .await;
    assert_eq!(response.status(), 200);

    let response = app
        .request_authenticated(
            Method::POST,
            &format!("/api/v1/logistics/drivers/{}/toggle-movement", driver_id),
            None,
        )
        .await;
    assert_eq!(response.status(), 200);
    let driver = response_json(response).await;
    assert_eq!(driver["is_moving"].as_bool(), Some(true));
}

#[tokio::test]
async fn stop_coordinates_are_validated() {
    let app = TestApp::new().await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/logistics/stops",
            Some(json!({ "address": "Nowhere", "latitude": 123.0, "longitude": 0.0 })),
        )
        .await;
    assert_eq!(response.status(), 400);
}
