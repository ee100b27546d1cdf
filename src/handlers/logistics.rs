use crate::auth::TenantContext;
use crate::errors::ServiceError;
use crate::services::logistics::CreateStopInput;
use crate::AppState;
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

pub async fn list_drivers(
    State(state): State<AppState>,
    ctx: TenantContext,
) -> Result<impl IntoResponse, ServiceError> {
    let drivers = state.services.logistics.list_drivers(ctx).await?;
    Ok(Json(drivers))
}

pub async fn seed_fixtures(
    State(state): State<AppState>,
    ctx: TenantContext,
) -> Result<impl IntoResponse, ServiceError> {
    let drivers = state.services.logistics.seed_fixtures(ctx).await?;
    Ok(Json(drivers))
}

pub async fn list_stops(
    State(state): State<AppState>,
    ctx: TenantContext,
) -> Result<impl IntoResponse, ServiceError> {
    let stops = state.services.logistics.list_stops(ctx).await?;
    Ok(Json(stops))
}

pub async fn create_stop(
    State(state): State<AppState>,
    ctx: TenantContext,
    Json(input): Json<CreateStopInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let stop = state.services.logistics.create_stop(ctx, input).await?;
    Ok((StatusCode::CREATED, Json(stop)))
}

pub async fn assign_route(
    State(state): State<AppState>,
    ctx: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let plan = state.services.logistics.assign_route(ctx, id).await?;
    Ok(Json(plan))
}

pub async fn complete_stop(
    State(state): State<AppState>,
    ctx: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let plan = state.services.logistics.complete_stop(ctx, id).await?;
    Ok(Json(plan))
}

pub async fn toggle_movement(
    State(state): State<AppState>,
    ctx: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let driver = state.services.logistics.toggle_movement(ctx, id).await?;
    Ok(Json(driver))
}
