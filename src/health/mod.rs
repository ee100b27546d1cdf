//! Health endpoints: a bare liveness probe plus a readiness probe that
//! pings the database.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use sea_orm::{ConnectionTrait, DatabaseConnection};
use serde::Serialize;
use std::sync::Arc;
use std::time::SystemTime;
use tracing::warn;

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Up,
    Down,
}

#[derive(Serialize, Debug)]
pub struct HealthInfo {
    pub status: HealthStatus,
    pub version: &'static str,
    pub timestamp: DateTime<Utc>,
    pub uptime_seconds: u64,
}

#[derive(Clone)]
pub struct HealthState {
    db: Arc<DatabaseConnection>,
    start_time: SystemTime,
}

impl HealthState {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            db,
            start_time: SystemTime::now(),
        }
    }

    fn uptime(&self) -> u64 {
        self.start_time.elapsed().map(|d| d.as_secs()).unwrap_or(0)
    }
}

pub fn health_routes(state: HealthState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/health/live", get(liveness))
        .route("/health/ready", get(readiness))
        .with_state(state)
}

async fn health(State(state): State<HealthState>) -> impl IntoResponse {
    Json(HealthInfo {
        status: HealthStatus::Up,
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now(),
        uptime_seconds: state.uptime(),
    })
}

async fn liveness() -> impl IntoResponse {
    StatusCode::OK
}

/// Ready only while the database answers a trivial query.
async fn readiness(State(state): State<HealthState>) -> impl IntoResponse {
    match state.db.execute_unprepared("SELECT 1").await {
        Ok(_) => (
            StatusCode::OK,
            Json(HealthInfo {
                status: HealthStatus::Up,
                version: env!("CARGO_PKG_VERSION"),
                timestamp: Utc::now(),
                uptime_seconds: state.uptime(),
            }),
        ),
        Err(err) => {
            warn!(error = %err, "readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthInfo {
                    status: HealthStatus::Down,
                    version: env!("CARGO_PKG_VERSION"),
                    timestamp: Utc::now(),
                    uptime_seconds: state.uptime(),
                }),
            )
        }
    }
}
