use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{self, Body},
    http::{Method, Request},
    response::Response,
    Router,
};
use serde_json::Value;
use tienda_api::{
    auth::{AuthConfig, AuthService},
    config::AppConfig,
    db,
    events::{self, feed::ChangeFeed, EventSender},
    handlers::AppServices,
    AppState,
};
use tokio::sync::mpsc;
use tower::ServiceExt;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

const TEST_JWT_SECRET: &str =
    "integration-test-signing-material-with-plenty-of-entropy-0123456789abcdef";

/// Harness that spins up the full router backed by a throwaway SQLite file.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    token: String,
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    _db_dir: tempfile::TempDir,
    _event_task: tokio::task::JoinHandle<()>,
}

impl TestApp {
    /// Fresh database, migrated schema and one registered owner account.
    pub async fn new() -> Self {
        let db_dir = tempfile::tempdir().expect("create temp dir for test db");
        let db_path = db_dir.path().join(format!("tienda-{}.db", Uuid::new_v4()));

        let mut cfg = AppConfig::new(
            format!("sqlite://{}?mode=rwc", db_path.display()),
            TEST_JWT_SECRET.to_string(),
            3600,
            86_400,
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        cfg.auto_migrate = true;
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let db_arc = Arc::new(pool);
        let (event_tx, event_rx) = mpsc::channel(256);
        let event_sender = EventSender::new(event_tx);
        let change_feed = Arc::new(ChangeFeed::new(256));
        let event_task = tokio::spawn(events::process_events(event_rx, change_feed));

        let auth_config = AuthConfig {
            jwt_secret: cfg.jwt_secret.clone(),
            jwt_audience: cfg.auth_audience.clone(),
            jwt_issuer: cfg.auth_issuer.clone(),
            access_token_expiration: Duration::from_secs(cfg.jwt_expiration as u64),
            refresh_token_expiration: Duration::from_secs(cfg.refresh_token_expiration as u64),
        };
        let auth_service = Arc::new(AuthService::new(auth_config, db_arc.clone()));

        let base_logger =
            tienda_api::logging::setup_logger(tienda_api::logging::LoggerConfig::default());
        let services = AppServices::new(db_arc.clone(), event_sender.clone(), &base_logger);

        let state = AppState {
            db: db_arc,
            config: cfg,
            event_sender,
            services,
        };

        let router = tienda_api::app(state.clone(), auth_service, CorsLayer::permissive());

        let mut app = Self {
            router,
            state,
            token: String::new(),
            tenant_id: Uuid::nil(),
            user_id: Uuid::nil(),
            _db_dir: db_dir,
            _event_task: event_task,
        };
        app.register_owner("Test Owner", "owner@example.com", "secret123")
            .await;
        app
    }

    /// Registers an account and adopts its token and tenant for
    /// subsequent authenticated requests.
    pub async fn register_owner(&mut self, name: &str, email: &str, password: &str) -> Value {
        let response = self
            .request(
                Method::POST,
                "/auth/register",
                Some(serde_json::json!({
                    "name": name,
                    "email": email,
                    "password": password,
                })),
                None,
            )
            .await;
        assert_eq!(response.status(), 201, "registration should succeed");
        let session = response_json(response).await;

        self.token = session["access_token"]
            .as_str()
            .expect("access token in session")
            .to_string();
        self.tenant_id = session["user"]["tenant_id"]
            .as_str()
            .and_then(|s| s.parse().ok())
            .expect("tenant id in session");
        self.user_id = session["user"]["id"]
            .as_str()
            .and_then(|s| s.parse().ok())
            .expect("user id in session");
        session
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Send a request against the router with an optional bearer token.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(tok) = token {
            builder = builder.header("authorization", format!("Bearer {}", tok));
        }

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Convenience helper for authenticated JSON requests.
    pub async fn request_authenticated(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> Response {
        self.request(method, uri, body, Some(self.token())).await
    }

    /// Create an inventory item through the API and return its JSON.
    pub async fn seed_item(&self, name: &str, sku: &str, stock: &str, price: &str) -> Value {
        let response = self
            .request_authenticated(
                Method::POST,
                "/api/v1/inventory",
                Some(serde_json::json!({
                    "name": name,
                    "sku": sku,
                    "stock": stock,
                    "price": price,
                })),
            )
            .await;
        assert_eq!(response.status(), 201, "seeding item {} should succeed", sku);
        response_json(response).await
    }

    /// Open a cash session through the API and return its id.
    pub async fn open_cash_session(&self, opening_amount: &str) -> Uuid {
        let response = self
            .request_authenticated(
                Method::POST,
                "/api/v1/cash-sessions",
                Some(serde_json::json!({ "opening_amount": opening_amount })),
            )
            .await;
        assert_eq!(response.status(), 201, "opening cash session should succeed");
        let session = response_json(response).await;
        session["id"]
            .as_str()
            .and_then(|s| s.parse().ok())
            .expect("session id")
    }
}

pub async fn response_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    serde_json::from_slice(&bytes).expect("json response")
}
