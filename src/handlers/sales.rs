use super::common::{PaginatedResponse, PaginationParams};
use crate::auth::TenantContext;
use crate::errors::ServiceError;
use crate::services::checkout::{CheckoutInput, Receipt};
use crate::AppState;
use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

/// Complete a cart in one atomic write
#[utoipa::path(
    post,
    path = "/api/v1/sales",
    request_body = CheckoutInput,
    responses(
        (status = 201, description = "Sale completed", body = Receipt),
        (status = 400, description = "Invalid cart", body = crate::errors::ErrorResponse),
        (status = 422, description = "Insufficient stock", body = crate::errors::ErrorResponse)
    ),
    tag = "sales"
)]
pub async fn checkout(
    State(state): State<AppState>,
    ctx: TenantContext,
    Json(input): Json<CheckoutInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let receipt = state.services.checkout.checkout(ctx, input).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

pub async fn list_sales(
    State(state): State<AppState>,
    ctx: TenantContext,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let (page, per_page) = params.clamped(u64::from(state.config.api_max_page_size));
    let (sales, total) = state
        .services
        .checkout
        .list_sales(ctx, page, per_page)
        .await?;
    Ok(Json(PaginatedResponse::new(sales, page, per_page, total)))
}

pub async fn get_sale(
    State(state): State<AppState>,
    ctx: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let receipt = state.services.checkout.get_sale(ctx, id).await?;
    Ok(Json(receipt))
}
