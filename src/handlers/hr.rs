use crate::auth::TenantContext;
use crate::errors::ServiceError;
use crate::AppState;
use axum::{
    extract::{Json, State},
    response::IntoResponse,
};

pub async fn list_employees(
    State(state): State<AppState>,
    ctx: TenantContext,
) -> Result<impl IntoResponse, ServiceError> {
    let employees = state.services.hr.list_employees(ctx).await?;
    Ok(Json(employees))
}

pub async fn seed_fixtures(
    State(state): State<AppState>,
    ctx: TenantContext,
) -> Result<impl IntoResponse, ServiceError> {
    let employees = state.services.hr.seed_fixtures(ctx).await?;
    Ok(Json(employees))
}
