use super::common::{PaginatedResponse, PaginationParams};
use crate::auth::TenantContext;
use crate::entities::inventory_item;
use crate::errors::ServiceError;
use crate::services::inventory::{CreateItemInput, StockEntryInput, UpdateItemInput};
use crate::AppState;
use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ItemFilters {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
    pub search: Option<String>,
}

fn default_page() -> u64 {
    1
}

fn default_per_page() -> u64 {
    20
}

/// List inventory items with optional name/SKU search
#[utoipa::path(
    get,
    path = "/api/v1/inventory",
    params(ItemFilters),
    responses(
        (status = 200, description = "Inventory list returned"),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 403, description = "Forbidden", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn list_items(
    State(state): State<AppState>,
    ctx: TenantContext,
    Query(filters): Query<ItemFilters>,
) -> Result<impl IntoResponse, ServiceError> {
    let params = PaginationParams {
        page: filters.page,
        per_page: filters.per_page,
    };
    let (page, per_page) = params.clamped(u64::from(state.config.api_max_page_size));
    let (items, total) = state
        .services
        .inventory
        .list_items(ctx, page, per_page, filters.search)
        .await?;
    Ok(Json(PaginatedResponse::new(items, page, per_page, total)))
}

/// Create an inventory item
#[utoipa::path(
    post,
    path = "/api/v1/inventory",
    request_body = CreateItemInput,
    responses(
        (status = 201, description = "Item created", body = inventory_item::Model),
        (status = 400, description = "Invalid input", body = crate::errors::ErrorResponse),
        (status = 409, description = "Duplicate SKU", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn create_item(
    State(state): State<AppState>,
    ctx: TenantContext,
    Json(input): Json<CreateItemInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state.services.inventory.create_item(ctx, input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// SKU lookup, the seam a barcode scanner feeds.
pub async fn get_item_by_sku(
    State(state): State<AppState>,
    ctx: TenantContext,
    Path(sku): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state.services.inventory.find_by_sku(ctx, &sku).await?;
    Ok(Json(item))
}

pub async fn get_item(
    State(state): State<AppState>,
    ctx: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state.services.inventory.get_item(ctx, id).await?;
    Ok(Json(item))
}

pub async fn update_item(
    State(state): State<AppState>,
    ctx: TenantContext,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateItemInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state.services.inventory.update_item(ctx, id, input).await?;
    Ok(Json(item))
}

pub async fn delete_item(
    State(state): State<AppState>,
    ctx: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.inventory.delete_item(ctx, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Items at or below their minimum stock level
#[utoipa::path(
    get,
    path = "/api/v1/inventory/low-stock",
    responses(
        (status = 200, description = "Low stock items", body = [inventory_item::Model])
    ),
    tag = "inventory"
)]
pub async fn low_stock(
    State(state): State<AppState>,
    ctx: TenantContext,
) -> Result<impl IntoResponse, ServiceError> {
    let items = state.services.inventory.low_stock_items(ctx).await?;
    Ok(Json(items))
}

/// Add received goods to an item's stock
#[utoipa::path(
    post,
    path = "/api/v1/inventory/{id}/stock-entries",
    request_body = StockEntryInput,
    responses(
        (status = 200, description = "Stock entry recorded", body = inventory_item::Model),
        (status = 400, description = "Invalid quantity", body = crate::errors::ErrorResponse),
        (status = 404, description = "Item not found", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn record_stock_entry(
    State(state): State<AppState>,
    ctx: TenantContext,
    Path(id): Path<Uuid>,
    Json(input): Json<StockEntryInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state
        .services
        .inventory
        .record_stock_entry(ctx, id, input)
        .await?;
    Ok(Json(item))
}
