//! Reporting endpoints over seeded sales data.

mod common;

use axum::http::Method;
use common::{response_json, TestApp};
use serde_json::json;

async fn sell(app: &TestApp, item: &serde_json::Value, quantity: &str, unit_price: &str) {
    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/sales",
            Some(json!({
                "lines": [
                    { "item_id": item["id"], "quantity": quantity, "unit_price": unit_price }
                ],
                "payment_method": "card"
            })),
        )
        .await;
    assert_eq!(response.status(), 201);
}

#[tokio::test]
async fn daily_sales_buckets_by_day() {
    let app = TestApp::new().await;
    let item = app.seed_item("Cerveza", "BEB-020", "100", "1800").await;
    sell(&app, &item, "2", "1800").await;
    sell(&app, &item, "1", "1800").await;

    let response = app
        .request_authenticated(Method::GET, "/api/v1/reports/daily-sales", None)
        .await;
    assert_eq!(response.status(), 200);
    let report = response_json(response).await;
    let days = report.as_array().unwrap();
    assert_eq!(days.len(), 1);
    assert_eq!(days[0]["sale_count"].as_u64(), Some(2));
    assert_eq!(days[0]["revenue"].as_str(), Some("5400"));
}

#[tokio::test]
async fn top_products_ranks_by_quantity() {
    let app = TestApp::new().await;
    let soda = app.seed_item("Soda", "BEB-021", "100", "700").await;
    let agua = app.seed_item("Agua", "BEB-022", "100", "600").await;
    sell(&app, &soda, "5", "700").await;
    sell(&app, &agua, "2", "600").await;

    let response = app
        .request_authenticated(Method::GET, "/api/v1/reports/top-products", None)
        .await;
    let report = response_json(response).await;
    let ranked = report.as_array().unwrap();
    assert_eq!(ranked[0]["sku"].as_str(), Some("BEB-021"));
    assert_eq!(ranked[0]["quantity_sold"].as_str(), Some("5"));
    assert_eq!(ranked[0]["revenue"].as_str(), Some("3500"));
    assert_eq!(ranked[1]["sku"].as_str(), Some("BEB-022"));
}

#[tokio::test]
async fn inventory_summary_values_stock_at_cost() {
    let app = TestApp::new().await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/inventory",
            Some(json!({
                "name": "Caramelos",
                "sku": "KIO-001",
                "stock": "10",
                "price": "200",
                "cost_price": "120",
                "min_stock": "20"
            })),
        )
        .await;
    assert_eq!(response.status(), 201);

    let response = app
        .request_authenticated(Method::GET, "/api/v1/reports/inventory-summary", None)
        .await;
    let summary = response_json(response).await;
    assert_eq!(summary["total_items"].as_u64(), Some(1));
    assert_eq!(summary["total_valuation"].as_str(), Some("1200"));
    assert_eq!(summary["critical_items"].as_u64(), Some(1));

    // a sold-out item with no configured minimum is not critical
    app.seed_item("Encendedor", "KIO-009", "0", "500").await;
    let response = app
        .request_authenticated(Method::GET, "/api/v1/reports/inventory-summary", None)
        .await;
    let summary = response_json(response).await;
    assert_eq!(summary["total_items"].as_u64(), Some(2));
    assert_eq!(summary["critical_items"].as_u64(), Some(1));
}

#[tokio::test]
async fn customer_summary_counts_buyers() {
    let app = TestApp::new().await;
    let item = app.seed_item("Chicles", "KIO-002", "50", "300").await;

    let buyer = response_json(
        app.request_authenticated(
            Method::POST,
            "/api/v1/customers",
            Some(json!({ "name": "Comprador" })),
        )
        .await,
    )
    .await;
    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/customers",
            Some(json!({ "name": "Mirador" })),
        )
        .await;
    assert_eq!(response.status(), 201);

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/sales",
            Some(json!({
                "lines": [
                    { "item_id": item["id"], "quantity": "1", "unit_price": "300" }
                ],
                "payment_method": "card",
                "customer_id": buyer["id"]
            })),
        )
        .await;
    assert_eq!(response.status(), 201);

    let response = app
        .request_authenticated(Method::GET, "/api/v1/reports/customer-summary", None)
        .await;
    let summary = response_json(response).await;
    assert_eq!(summary["total_customers"].as_u64(), Some(2));
    assert_eq!(summary["customers_with_sales"].as_u64(), Some(1));

    let ranking = summary["top_customers"].as_array().unwrap();
    assert_eq!(ranking.len(), 1);
    assert_eq!(ranking[0]["name"].as_str(), Some("Comprador"));
    assert_eq!(ranking[0]["purchase_count"].as_u64(), Some(1));
    assert_eq!(ranking[0]["total_spent"].as_str(), Some("300"));
}

#[tokio::test]
async fn customer_ranking_orders_by_lifetime_spend() {
    let app = TestApp::new().await;
    let item = app.seed_item("Yerba", "ALM-030", "100", "3000").await;

    let mut ids = Vec::new();
    for name in ["Ana", "Bruno"] {
        let customer = response_json(
            app.request_authenticated(
                Method::POST,
                "/api/v1/customers",
                Some(json!({ "name": name })),
            )
            .await,
        )
        .await;
        ids.push(customer["id"].clone());
    }

    // Ana buys once, Bruno buys twice for a larger lifetime spend
    for (customer_id, quantity) in [(&ids[0], "1"), (&ids[1], "1"), (&ids[1], "3")] {
        let response = app
            .request_authenticated(
                Method::POST,
                "/api/v1/sales",
                Some(json!({
                    "lines": [
                        { "item_id": item["id"], "quantity": quantity, "unit_price": "3000" }
                    ],
                    "payment_method": "card",
                    "customer_id": customer_id
                })),
            )
            .await;
        assert_eq!(response.status(), 201);
    }

    let response = app
        .request_authenticated(Method::GET, "/api/v1/reports/customer-summary", None)
        .await;
    let summary = response_json(response).await;
    let ranking = summary["top_customers"].as_array().unwrap();
    assert_eq!(ranking.len(), 2);
    assert_eq!(ranking[0]["name"].as_str(), Some("Bruno"));
    assert_eq!(ranking[0]["purchase_count"].as_u64(), Some(2));
    assert_eq!(ranking[0]["total_spent"].as_str(), Some("12000"));
    assert_eq!(ranking[1]["name"].as_str(), Some("Ana"));
}

#[tokio::test]
async fn iva_book_splits_totals_into_net_and_vat() {
    let app = TestApp::new().await;
    let item = app.seed_item("Vino tinto", "BEB-010", "10", "12100").await;
    sell(&app, &item, "1", "12100").await;

    let response = app
        .request_authenticated(Method::GET, "/api/v1/reports/iva-book", None)
        .await;
    assert_eq!(response.status(), 200);
    let book = response_json(response).await;
    let entries = book.as_array().unwrap();
    assert_eq!(entries.len(), 1);

    let entry = &entries[0];
    // 12100 gross at 21% VAT is 10000 net + 2100 VAT
    let net: f64 = entry["net_amount"].as_str().unwrap().parse().unwrap();
    let iva: f64 = entry["iva_amount"].as_str().unwrap().parse().unwrap();
    assert_eq!(net, 10000.0);
    assert_eq!(iva, 2100.0);
    assert_eq!(entry["total"].as_str(), Some("12100"));
    assert_eq!(entry["customer_name"].as_str(), Some("Consumidor Final"));
    assert!(entry["voucher"].as_str().unwrap().starts_with("FAC-"));
}
