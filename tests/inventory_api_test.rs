//! Inventory CRUD, SKU uniqueness, search and the stock-entry flow.

mod common;

use axum::http::Method;
use common::{response_json, TestApp};
use serde_json::json;

#[tokio::test]
async fn create_and_fetch_item() {
    let app = TestApp::new().await;

    let item = app.seed_item("Fernet", "BEB-001", "12", "8500").await;
    assert_eq!(item["name"].as_str(), Some("Fernet"));
    assert_eq!(item["sku"].as_str(), Some("BEB-001"));

    let response = app
        .request_authenticated(
            Method::GET,
            &format!("/api/v1/inventory/{}", item["id"].as_str().unwrap()),
            None,
        )
        .await;
    assert_eq!(response.status(), 200);
    let fetched = response_json(response).await;
    assert_eq!(fetched["stock"].as_str(), Some("12"));
}

#[tokio::test]
async fn duplicate_sku_in_tenant_conflicts() {
    let app = TestApp::new().await;
    app.seed_item("Gaseosa", "BEB-002", "10", "1200").await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/inventory",
            Some(json!({ "name": "Otra gaseosa", "sku": "BEB-002", "price": "1300" })),
        )
        .await;
    assert_eq!(response.status(), 409);
}

#[tokio::test]
async fn fractional_stock_is_supported() {
    let app = TestApp::new().await;

    let item = app.seed_item("Queso en horma", "LACTEO-002", "2.5", "5400").await;
    assert_eq!(item["stock"].as_str(), Some("2.5"));
}

#[tokio::test]
async fn search_matches_name_and_sku() {
    let app = TestApp::new().await;
    app.seed_item("Detergente", "LIMP-001", "8", "950").await;
    app.seed_item("Lavandina", "LIMP-002", "14", "600").await;
    app.seed_item("Arroz", "ALM-010", "40", "1100").await;

    let response = app
        .request_authenticated(Method::GET, "/api/v1/inventory?search=LIMP", None)
        .await;
    let page = response_json(response).await;
    assert_eq!(page["total"].as_u64(), Some(2));

    let response = app
        .request_authenticated(Method::GET, "/api/v1/inventory?search=arroz", None)
        .await;
    let page = response_json(response).await;
    assert_eq!(page["total"].as_u64(), Some(1));
}

#[tokio::test]
async fn update_cannot_touch_stock_directly() {
    let app = TestApp::new().await;
    let item = app.seed_item("Aceite", "ALM-011", "6", "3200").await;

    let response = app
        .request_authenticated(
            Method::PUT,
            &format!("/api/v1/inventory/{}", item["id"].as_str().unwrap()),
            Some(json!({ "name": "Aceite de girasol", "price": "3500" })),
        )
        .await;
    assert_eq!(response.status(), 200);
    let updated = response_json(response).await;
    assert_eq!(updated["name"].as_str(), Some("Aceite de girasol"));
    assert_eq!(updated["price"].as_str(), Some("3500"));
    assert_eq!(updated["stock"].as_str(), Some("6"));
}

#[tokio::test]
async fn stock_entry_raises_stock_and_ledgers_it() {
    let app = TestApp::new().await;
    let item = app.seed_item("Harina", "ALM-012", "10", "750").await;

    let response = app
        .request_authenticated(
            Method::POST,
            &format!(
                "/api/v1/inventory/{}/stock-entries",
                item["id"].as_str().unwrap()
            ),
            Some(json!({ "quantity": "25", "notes": "Pedido mayorista" })),
        )
        .await;
    assert_eq!(response.status(), 200);
    let updated = response_json(response).await;
    assert_eq!(updated["stock"].as_str(), Some("35"));

    let response = app
        .request_authenticated(Method::GET, "/api/v1/stock-movements", None)
        .await;
    let movements = response_json(response).await;
    let first = &movements["data"][0];
    assert_eq!(first["reason"].as_str(), Some("stock_entry"));
    assert_eq!(first["direction"].as_str(), Some("inbound"));
}

#[tokio::test]
async fn stock_entry_rejects_non_positive_quantity() {
    let app = TestApp::new().await;
    let item = app.seed_item("Sal", "ALM-013", "5", "400").await;

    let response = app
        .request_authenticated(
            Method::POST,
            &format!(
                "/api/v1/inventory/{}/stock-entries",
                item["id"].as_str().unwrap()
            ),
            Some(json!({ "quantity": "0" })),
        )
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn low_stock_lists_items_at_or_below_minimum() {
    let app = TestApp::new().await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/inventory",
            Some(json!({
                "name": "Manteca",
                "sku": "LACTEO-003",
                "stock": "2",
                "price": "1900",
                "min_stock": "5"
            })),
        )
        .await;
    assert_eq!(response.status(), 201);
    app.seed_item("Leche", "LACTEO-004", "30", "1100").await;

    let response = app
        .request_authenticated(Method::GET, "/api/v1/inventory/low-stock", None)
        .await;
    let low = response_json(response).await;
    let skus: Vec<&str> = low
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|i| i["sku"].as_str())
        .collect();
    assert!(skus.contains(&"LACTEO-003"));
    assert!(!skus.contains(&"LACTEO-004"));
}

#[tokio::test]
async fn sold_out_item_without_a_minimum_is_not_low_stock() {
    let app = TestApp::new().await;

    // min_stock defaults to zero, meaning no threshold is configured
    app.seed_item("Bolsa camiseta", "VARIOS-001", "0", "50").await;

    let response = app
        .request_authenticated(Method::GET, "/api/v1/inventory/low-stock", None)
        .await;
    assert_eq!(response.status(), 200);
    let low = response_json(response).await;
    assert_eq!(low.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn sku_lookup_finds_the_scanned_item() {
    let app = TestApp::new().await;
    app.seed_item("Mermelada", "ALM-015", "9", "1400").await;

    let response = app
        .request_authenticated(Method::GET, "/api/v1/inventory/by-sku/ALM-015", None)
        .await;
    assert_eq!(response.status(), 200);
    let item = response_json(response).await;
    assert_eq!(item["name"].as_str(), Some("Mermelada"));

    let response = app
        .request_authenticated(Method::GET, "/api/v1/inventory/by-sku/NADA-000", None)
        .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn delete_removes_item() {
    let app = TestApp::new().await;
    let item = app.seed_item("Vinagre", "ALM-014", "4", "650").await;
    let id = item["id"].as_str().unwrap().to_string();

    let response = app
        .request_authenticated(Method::DELETE, &format!("/api/v1/inventory/{}", id), None)
        .await;
    assert_eq!(response.status(), 204);

    let response = app
        .request_authenticated(Method::GET, &format!("/api/v1/inventory/{}", id), None)
        .await;
    assert_eq!(response.status(), 404);
}
