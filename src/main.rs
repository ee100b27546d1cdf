use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use http::HeaderValue;
use tokio::{signal, sync::mpsc};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use tienda_api as api;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = api::config::load_config()?;
    api::config::init_tracing(cfg.log_level(), cfg.log_json);

    let db_pool = api::db::establish_connection_from_app_config(&cfg).await?;
    if cfg.auto_migrate {
        api::db::run_migrations(&db_pool).await.map_err(|e| {
            error!("Failed running migrations: {}", e);
            e
        })?;
    }
    let db = Arc::new(db_pool);

    // Events: mpsc intake, broadcast fan-out to change feed subscribers
    let (event_tx, event_rx) = mpsc::channel(cfg.event_channel_capacity);
    let event_sender = api::events::EventSender::new(event_tx);
    let change_feed = Arc::new(api::events::feed::ChangeFeed::new(
        cfg.event_channel_capacity,
    ));
    tokio::spawn(api::events::process_events(event_rx, change_feed.clone()));

    let auth_config = api::auth::AuthConfig {
        jwt_secret: cfg.jwt_secret.clone(),
        jwt_issuer: cfg.auth_issuer.clone(),
        jwt_audience: cfg.auth_audience.clone(),
        access_token_expiration: Duration::from_secs(cfg.jwt_expiration as u64),
        refresh_token_expiration: Duration::from_secs(cfg.refresh_token_expiration as u64),
    };
    let auth_service = Arc::new(api::auth::AuthService::new(auth_config, db.clone()));

    let base_logger = api::logging::setup_logger(api::logging::LoggerConfig::default());
    let services = api::handlers::AppServices::new(db.clone(), event_sender.clone(), &base_logger);

    let app_state = api::AppState {
        db: db.clone(),
        config: cfg.clone(),
        event_sender,
        services,
    };

    let cors_layer = build_cors_layer(&cfg)?;
    let app = api::app(app_state, auth_service, cors_layer);

    let addr: SocketAddr = format!("{}:{}", cfg.host, cfg.port)
        .parse()
        .context("invalid host/port in configuration")?;
    info!("tienda-api listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn build_cors_layer(
    cfg: &api::config::AppConfig,
) -> Result<CorsLayer, Box<dyn std::error::Error>> {
    let configured_origins: Vec<HeaderValue> = cfg
        .allowed_origins()
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    if !configured_origins.is_empty() {
        let origins = configured_origins;
        Ok(CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any))
    } else if cfg.cors_allow_any_origin || cfg.is_development() {
        info!("Using permissive CORS; explicit origins were not configured");
        Ok(CorsLayer::permissive())
    } else {
        error!("Missing CORS configuration; set APP__CORS_ALLOWED_ORIGINS or APP__CORS_ALLOW_ANY_ORIGIN=true");
        Err("Missing CORS configuration: set APP__CORS_ALLOWED_ORIGINS or APP__CORS_ALLOW_ANY_ORIGIN=true".into())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("failed to install Ctrl+C handler: {}", err);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => error!("failed to install signal handler: {}", err),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
