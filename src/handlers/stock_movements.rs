use super::common::{PaginatedResponse, PaginationParams};
use crate::auth::TenantContext;
use crate::errors::ServiceError;
use crate::services::stock_movements::RecordMovementInput;
use crate::AppState;
use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct MovementResponse {
    movement: crate::entities::stock_movement::Model,
    item: crate::entities::inventory_item::Model,
}

pub async fn list_movements(
    State(state): State<AppState>,
    ctx: TenantContext,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let (page, per_page) = params.clamped(u64::from(state.config.api_max_page_size));
    let (movements, total) = state
        .services
        .stock_movements
        .list_movements(ctx, page, per_page)
        .await?;
    Ok(Json(PaginatedResponse::new(movements, page, per_page, total)))
}

pub async fn record_movement(
    State(state): State<AppState>,
    ctx: TenantContext,
    Json(input): Json<RecordMovementInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let (movement, item) = state
        .services
        .stock_movements
        .record_movement(ctx, input)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(MovementResponse { movement, item }),
    ))
}
