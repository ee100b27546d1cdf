use super::common::{PaginatedResponse, PaginationParams};
use crate::auth::TenantContext;
use crate::errors::ServiceError;
use crate::services::customers::{CreateCustomerInput, UpdateCustomerInput};
use crate::AppState;
use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CustomerFilters {
    #[serde(default = "first_page")]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
    pub search: Option<String>,
}

fn first_page() -> u64 {
    1
}

fn default_per_page() -> u64 {
    20
}

pub async fn list_customers(
    State(state): State<AppState>,
    ctx: TenantContext,
    Query(filters): Query<CustomerFilters>,
) -> Result<impl IntoResponse, ServiceError> {
    let params = PaginationParams {
        page: filters.page,
        per_page: filters.per_page,
    };
    let (page, per_page) = params.clamped(u64::from(state.config.api_max_page_size));
    let (customers, total) = state
        .services
        .customers
        .list_customers(ctx, page, per_page, filters.search)
        .await?;
    Ok(Json(PaginatedResponse::new(customers, page, per_page, total)))
}

pub async fn create_customer(
    State(state): State<AppState>,
    ctx: TenantContext,
    Json(input): Json<CreateCustomerInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let customer = state.services.customers.create_customer(ctx, input).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

pub async fn get_customer(
    State(state): State<AppState>,
    ctx: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let customer = state.services.customers.get_customer(ctx, id).await?;
    Ok(Json(customer))
}

pub async fn update_customer(
    State(state): State<AppState>,
    ctx: TenantContext,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateCustomerInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let customer = state
        .services
        .customers
        .update_customer(ctx, id, input)
        .await?;
    Ok(Json(customer))
}

pub async fn delete_customer(
    State(state): State<AppState>,
    ctx: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.customers.delete_customer(ctx, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
