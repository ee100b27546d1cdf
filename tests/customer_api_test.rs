//! Customer CRUD and search.

mod common;

use axum::http::Method;
use common::{response_json, TestApp};
use serde_json::json;

#[tokio::test]
async fn create_update_and_delete_customer() {
    let app = TestApp::new().await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/customers",
            Some(json!({
                "name": "Carniceria San Martin",
                "tax_id": "30-11222333-4",
                "email": "compras@sanmartin.example",
                "phone": "+54 11 4555-0000",
                "address": "Av. San Martin 1234"
            })),
        )
        .await;
    assert_eq!(response.status(), 201);
    let customer = response_json(response).await;
    let id = customer["id"].as_str().unwrap().to_string();

    let response = app
        .request_authenticated(
            Method::PUT,
            &format!("/api/v1/customers/{}", id),
            Some(json!({ "phone": "+54 11 4555-9999" })),
        )
        .await;
    assert_eq!(response.status(), 200);
    let updated = response_json(response).await;
    assert_eq!(updated["phone"].as_str(), Some("+54 11 4555-9999"));
    assert_eq!(updated["name"].as_str(), Some("Carniceria San Martin"));

    let response = app
        .request_authenticated(Method::DELETE, &format!("/api/v1/customers/{}", id), None)
        .await;
    assert_eq!(response.status(), 204);

    let response = app
        .request_authenticated(Method::GET, &format!("/api/v1/customers/{}", id), None)
        .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn customer_requires_a_name() {
    let app = TestApp::new().await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/customers",
            Some(json!({ "name": "" })),
        )
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn search_covers_name_tax_id_and_address() {
    let app = TestApp::new().await;
    for (name, tax_id, address) in [
        ("Almacen Norte", "30-55666777-1", "Corrientes 800"),
        ("Kiosco Sur", "27-88999000-2", "Rivadavia 2200"),
    ] {
        let response = app
            .request_authenticated(
                Method::POST,
                "/api/v1/customers",
                Some(json!({ "name": name, "tax_id": tax_id, "address": address })),
            )
            .await;
        assert_eq!(response.status(), 201);
    }

    let by_name = response_json(
        app.request_authenticated(Method::GET, "/api/v1/customers?search=Norte", None)
            .await,
    )
    .await;
    assert_eq!(by_name["total"].as_u64(), Some(1));

    let by_tax_id = response_json(
        app.request_authenticated(Method::GET, "/api/v1/customers?search=88999", None)
            .await,
    )
    .await;
    assert_eq!(by_tax_id["total"].as_u64(), Some(1));

    let by_address = response_json(
        app.request_authenticated(Method::GET, "/api/v1/customers?search=Rivadavia", None)
            .await,
    )
    .await;
    assert_eq!(by_address["total"].as_u64(), Some(1));
}

#[tokio::test]
async fn sale_can_reference_a_customer() {
    let app = TestApp::new().await;
    let item = app.seed_item("Vino", "BEB-010", "10", "4200").await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/customers",
            Some(json!({ "name": "Cliente Frecuente" })),
        )
        .await;
    let customer = response_json(response).await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/sales",
            Some(json!({
                "lines": [
                    { "item_id": item["id"], "quantity": "1", "unit_price": "4200" }
                ],
                "payment_method": "card",
                "customer_id": customer["id"]
            })),
        )
        .await;
    assert_eq!(response.status(), 201);
    let receipt = response_json(response).await;
    assert_eq!(receipt["sale"]["customer_id"], customer["id"]);
}
