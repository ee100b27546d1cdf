use super::common::{PaginatedResponse, PaginationParams};
use crate::auth::TenantContext;
use crate::errors::ServiceError;
use crate::services::cash_sessions::OpenSessionInput;
use crate::AppState;
use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use uuid::Uuid;

pub fn cash_session_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sessions).post(open_session))
        .route("/active", get(active_session))
        .route("/:id", get(get_session))
        .route("/:id/close", post(close_session))
}

pub async fn open_session(
    State(state): State<AppState>,
    ctx: TenantContext,
    Json(input): Json<OpenSessionInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let session = state
        .services
        .cash_sessions
        .open_session(ctx, input)
        .await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// The caller's currently open session. 404 when none is open.
pub async fn active_session(
    State(state): State<AppState>,
    ctx: TenantContext,
) -> Result<impl IntoResponse, ServiceError> {
    let session = state
        .services
        .cash_sessions
        .find_active(ctx)
        .await?
        .ok_or_else(|| ServiceError::NotFound("No open cash session".into()))?;
    Ok(Json(session))
}

pub async fn get_session(
    State(state): State<AppState>,
    ctx: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let session = state.services.cash_sessions.get_session(ctx, id).await?;
    Ok(Json(session))
}

pub async fn close_session(
    State(state): State<AppState>,
    ctx: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let session = state.services.cash_sessions.close_session(ctx, id).await?;
    Ok(Json(session))
}

pub async fn list_sessions(
    State(state): State<AppState>,
    ctx: TenantContext,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let (page, per_page) = params.clamped(u64::from(state.config.api_max_page_size));
    let (sessions, total) = state
        .services
        .cash_sessions
        .list_sessions(ctx, page, per_page)
        .await?;
    Ok(Json(PaginatedResponse::new(sessions, page, per_page, total)))
}
