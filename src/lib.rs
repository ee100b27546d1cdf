//! Tienda API Library
//!
//! Back office and point of sale for small retail shops: inventory,
//! checkout, customers, a stock-movement ledger, cash register sessions,
//! reports and a simulated delivery fleet.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod health;
pub mod logging;
pub mod middleware_helpers;
pub mod migrator;
pub mod openapi;
pub mod services;
pub mod tracing;

use axum::{response::Json, routing::get, Router};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::ToSchema;

use crate::auth::consts as perm;
use crate::auth::AuthRouterExt;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub event_sender: events::EventSender,
    pub services: handlers::AppServices,
}

/// Common response wrapper for status-style endpoints.
#[derive(Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

#[derive(Serialize, ToSchema)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub timestamp: String,
}

impl ResponseMeta {
    fn capture() -> Self {
        Self {
            request_id: crate::tracing::current_request_id().map(|rid| rid.as_str().to_string()),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            meta: Some(ResponseMeta::capture()),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
            meta: Some(ResponseMeta::capture()),
        }
    }
}

/// Versioned API surface. Every group below carries its own auth and
/// permission gate.
pub fn api_v1_routes() -> Router<AppState> {
    use axum::routing::{delete, post, put};
    use handlers::{
        cash_sessions, customers, hr, inventory, logistics, reports, sales, stock_movements,
    };

    let inventory_read = Router::new()
        .route("/inventory", get(inventory::list_items))
        .route("/inventory/low-stock", get(inventory::low_stock))
        .route("/inventory/by-sku/:sku", get(inventory::get_item_by_sku))
        .route("/inventory/:id", get(inventory::get_item))
        .with_permission(perm::INVENTORY_READ);

    let inventory_manage = Router::new()
        .route("/inventory", post(inventory::create_item))
        .route("/inventory/:id", put(inventory::update_item))
        .route("/inventory/:id", delete(inventory::delete_item))
        .route(
            "/inventory/:id/stock-entries",
            post(inventory::record_stock_entry),
        )
        .with_permission(perm::INVENTORY_MANAGE);

    let movements_read = Router::new()
        .route("/stock-movements", get(stock_movements::list_movements))
        .with_permission(perm::STOCK_MOVEMENTS_READ);

    let movements_create = Router::new()
        .route("/stock-movements", post(stock_movements::record_movement))
        .with_permission(perm::STOCK_MOVEMENTS_CREATE);

    let customers_read = Router::new()
        .route("/customers", get(customers::list_customers))
        .route("/customers/:id", get(customers::get_customer))
        .with_permission(perm::CUSTOMERS_READ);

    let customers_manage = Router::new()
        .route("/customers", post(customers::create_customer))
        .route("/customers/:id", put(customers::update_customer))
        .route("/customers/:id", delete(customers::delete_customer))
        .with_permission(perm::CUSTOMERS_MANAGE);

    let sales_read = Router::new()
        .route("/sales", get(sales::list_sales))
        .route("/sales/:id", get(sales::get_sale))
        .with_permission(perm::SALES_READ);

    let sales_create = Router::new()
        .route("/sales", post(sales::checkout))
        .with_permission(perm::SALES_CREATE);

    let cash_register = cash_sessions::cash_session_routes()
        .with_permission(perm::CASH_SESSIONS_MANAGE);

    let report_routes = reports::report_routes().with_permission(perm::REPORTS_READ);

    let logistics_read = Router::new()
        .route("/logistics/drivers", get(logistics::list_drivers))
        .route("/logistics/stops", get(logistics::list_stops))
        .with_permission(perm::LOGISTICS_READ);

    let logistics_manage = Router::new()
        .route("/logistics/drivers/seed", post(logistics::seed_fixtures))
        .route("/logistics/drivers/:id/route", post(logistics::assign_route))
        .route(
            "/logistics/drivers/:id/complete-stop",
            post(logistics::complete_stop),
        )
        .route(
            "/logistics/drivers/:id/toggle-movement",
            post(logistics::toggle_movement),
        )
        .route("/logistics/stops", post(logistics::create_stop))
        .with_permission(perm::LOGISTICS_MANAGE);

    let hr_read = Router::new()
        .route("/hr/employees", get(hr::list_employees))
        .with_permission(perm::HR_READ);

    let hr_manage = Router::new()
        .route("/hr/employees/seed", post(hr::seed_fixtures))
        .with_permission(perm::HR_MANAGE);

    Router::new()
        .route("/status", get(api_status))
        .merge(inventory_read)
        .merge(inventory_manage)
        .merge(movements_read)
        .merge(movements_create)
        .merge(customers_read)
        .merge(customers_manage)
        .merge(sales_read)
        .merge(sales_create)
        .nest("/cash-sessions", cash_register)
        .nest("/reports", report_routes)
        .merge(logistics_read)
        .merge(logistics_manage)
        .merge(hr_read)
        .merge(hr_manage)
}

async fn api_status() -> Result<Json<ApiResponse<Value>>, errors::ServiceError> {
    let status_data = json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "tienda-api",
        "timestamp": Utc::now().to_rfc3339(),
    });
    Ok(Json(ApiResponse::success(status_data)))
}

/// Assemble the full application router. Used by the binary and the
/// integration tests.
pub fn app(
    state: AppState,
    auth_service: Arc<auth::AuthService>,
    cors: CorsLayer,
) -> Router {
    let db = state.db.clone();

    Router::new()
        .route("/", get(|| async { "tienda-api up" }))
        .nest("/api/v1", api_v1_routes())
        .with_state(state)
        .nest("/auth", auth::auth_routes(auth_service.clone()))
        .merge(health::health_routes(health::HealthState::new(db)))
        .merge(openapi::swagger_ui())
        .layer(crate::tracing::configure_http_tracing())
        .layer(tower_http::compression::CompressionLayer::new())
        .layer(cors)
        // Inject AuthService into request extensions for auth middleware
        .layer(axum::middleware::from_fn_with_state(
            auth_service,
            |axum::extract::State(auth): axum::extract::State<Arc<auth::AuthService>>,
             mut req: axum::http::Request<axum::body::Body>,
             next: axum::middleware::Next| async move {
                req.extensions_mut().insert(auth);
                next.run(req).await
            },
        ))
        // Ensure every request carries a request id for traceability
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id::request_id_middleware,
        ))
}

#[cfg(test)]
mod response_tests {
    use super::*;
    use chrono::DateTime;

    #[tokio::test]
    async fn success_response_includes_request_metadata() {
        let response =
            crate::tracing::scope_request_id(crate::tracing::RequestId::new("meta-123"), async {
                ApiResponse::success("ok")
            })
            .await;

        let meta = response.meta.expect("metadata expected");
        assert_eq!(meta.request_id.as_deref(), Some("meta-123"));
        DateTime::parse_from_rfc3339(&meta.timestamp).expect("timestamp should parse");
    }

    #[tokio::test]
    async fn error_response_includes_request_metadata() {
        let response =
            crate::tracing::scope_request_id(crate::tracing::RequestId::new("meta-err"), async {
                ApiResponse::<()>::error("oops".into())
            })
            .await;

        let meta = response.meta.expect("metadata expected");
        assert_eq!(meta.request_id.as_deref(), Some("meta-err"));
        assert!(!meta.timestamp.is_empty());
    }
}
