use crate::auth::TenantContext;
use crate::errors::ServiceError;
use crate::AppState;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/daily-sales", get(daily_sales))
        .route("/top-products", get(top_products))
        .route("/inventory-summary", get(inventory_summary))
        .route("/customer-summary", get(customer_summary))
        .route("/iva-book", get(iva_book))
}

#[derive(Debug, Deserialize)]
pub struct DateRange {
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct TopProductsParams {
    #[serde(default = "default_top_limit")]
    limit: usize,
}

fn default_top_limit() -> usize {
    10
}

pub async fn daily_sales(
    State(state): State<AppState>,
    ctx: TenantContext,
    Query(range): Query<DateRange>,
) -> Result<impl IntoResponse, ServiceError> {
    let report = state
        .services
        .reports
        .daily_sales(ctx, range.from, range.to)
        .await?;
    Ok(Json(report))
}

pub async fn top_products(
    State(state): State<AppState>,
    ctx: TenantContext,
    Query(params): Query<TopProductsParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let report = state
        .services
        .reports
        .top_products(ctx, params.limit.min(100))
        .await?;
    Ok(Json(report))
}

pub async fn inventory_summary(
    State(state): State<AppState>,
    ctx: TenantContext,
) -> Result<impl IntoResponse, ServiceError> {
    let report = state.services.reports.inventory_summary(ctx).await?;
    Ok(Json(report))
}

pub async fn customer_summary(
    State(state): State<AppState>,
    ctx: TenantContext,
) -> Result<impl IntoResponse, ServiceError> {
    let report = state.services.reports.customer_summary(ctx).await?;
    Ok(Json(report))
}

pub async fn iva_book(
    State(state): State<AppState>,
    ctx: TenantContext,
    Query(range): Query<DateRange>,
) -> Result<impl IntoResponse, ServiceError> {
    let report = state
        .services
        .reports
        .iva_book(ctx, range.from, range.to)
        .await?;
    Ok(Json(report))
}
