//! Authentication and authorization: JWT access/refresh tokens, argon2
//! password hashing, permission-gated routing and tenant scoping.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use uuid::Uuid;
use validator::Validate;

pub mod permissions;
pub mod refresh_token;
pub mod user;

pub use permissions::{consts, owner_permissions};

/// Claim structure for JWT tokens
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,               // Subject (user ID)
    pub name: Option<String>,      // User's name
    pub email: Option<String>,     // User's email
    pub roles: Vec<String>,        // User's roles
    pub permissions: Vec<String>,  // User's explicit permissions
    pub tenant_id: Option<String>, // Tenant the account owns
    pub jti: String,               // JWT ID (unique identifier for this token)
    pub iat: i64,                  // Issued at time
    pub exp: i64,                  // Expiration time
    pub nbf: i64,                  // Not valid before time
    pub iss: String,               // Issuer
    pub aud: String,               // Audience
}

/// Authenticated user data extracted from the JWT token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub user_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub roles: Vec<String>,
    pub permissions: Vec<String>,
    pub tenant_id: Option<String>,
    pub token_id: String,
}

impl AuthUser {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role("admin")
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(AuthError::MissingAuth)
    }
}

/// Tenant scope for a request. Every service call takes one of these; no
/// query runs without an explicit tenant id.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TenantContext {
    pub tenant_id: Uuid,
    pub user_id: Uuid,
}

impl TenantContext {
    pub fn from_auth(user: &AuthUser) -> Result<Self, AuthError> {
        let user_id = Uuid::parse_str(&user.user_id).map_err(|_| AuthError::InvalidToken)?;
        let tenant_id = user
            .tenant_id
            .as_deref()
            .and_then(|t| Uuid::parse_str(t).ok())
            .ok_or(AuthError::InvalidToken)?;
        Ok(Self { tenant_id, user_id })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        TenantContext::from_auth(&user)
    }
}

/// Authentication configuration
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_audience: String,
    pub jwt_issuer: String,
    pub access_token_expiration: Duration,
    pub refresh_token_expiration: Duration,
}

impl AuthConfig {
    pub fn new(
        jwt_secret: String,
        jwt_audience: String,
        jwt_issuer: String,
        access_token_expiration: Duration,
        refresh_token_expiration: Duration,
    ) -> Self {
        Self {
            jwt_secret,
            jwt_audience,
            jwt_issuer,
            access_token_expiration,
            refresh_token_expiration,
        }
    }
}

/// Token blacklist entry
#[derive(Debug, Clone)]
struct BlacklistedToken {
    jti: String,
    expiry: DateTime<Utc>,
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    pub config: AuthConfig,
    pub db: Arc<DatabaseConnection>,
    blacklisted_tokens: Arc<RwLock<Vec<BlacklistedToken>>>,
}

impl AuthService {
    pub fn new(config: AuthConfig, db: Arc<DatabaseConnection>) -> Self {
        Self {
            config,
            db,
            blacklisted_tokens: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Register a new account and mint its first token pair.
    #[instrument(skip(self, request))]
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthSession, AuthError> {
        request
            .validate()
            .map_err(|e| AuthError::Validation(e.to_string()))?;
        if request.password.chars().count() < 6 {
            return Err(AuthError::WeakPassword);
        }

        let existing = user::Entity::find()
            .filter(user::Column::Email.eq(request.email.clone()))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;
        if existing.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let user_id = Uuid::new_v4();
        let now = Utc::now();
        let account = user::ActiveModel {
            id: Set(user_id),
            // Each account owns its own tenant
            tenant_id: Set(user_id),
            name: Set(request.name),
            email: Set(request.email),
            password_hash: Set(hash_password(&request.password)?),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(self.db.as_ref())
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        let tokens = self.generate_token(&account).await?;
        Ok(AuthSession::new(tokens, &account))
    }

    /// Validate credentials and mint a token pair. Unknown email and wrong
    /// password are indistinguishable to the caller.
    #[instrument(skip(self, credentials))]
    pub async fn login(&self, credentials: LoginCredentials) -> Result<AuthSession, AuthError> {
        let account = user::Entity::find()
            .filter(user::Column::Email.eq(credentials.email.clone()))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?
            .ok_or(AuthError::InvalidCredentials)?;

        if !account.active {
            return Err(AuthError::InvalidCredentials);
        }
        verify_password(&credentials.password, &account.password_hash)?;

        let tokens = self.generate_token(&account).await?;
        Ok(AuthSession::new(tokens, &account))
    }

    /// Generate a JWT access/refresh pair for a user
    pub async fn generate_token(&self, account: &user::Model) -> Result<TokenPair, AuthError> {
        let now = Utc::now();
        let access_exp = now
            + ChronoDuration::from_std(self.config.access_token_expiration)
                .map_err(|e| AuthError::TokenCreation(e.to_string()))?;
        let refresh_exp = now
            + ChronoDuration::from_std(self.config.refresh_token_expiration)
                .map_err(|e| AuthError::TokenCreation(e.to_string()))?;

        let refresh_jti = Uuid::new_v4().to_string();
        let access_claims = Claims {
            sub: account.id.to_string(),
            name: Some(account.name.clone()),
            email: Some(account.email.clone()),
            roles: vec!["owner".to_string()],
            permissions: owner_permissions(),
            tenant_id: Some(account.tenant_id.to_string()),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: access_exp.timestamp(),
            nbf: now.timestamp(),
            iss: self.config.jwt_issuer.clone(),
            aud: self.config.jwt_audience.clone(),
        };

        // Refresh claims carry no roles or permissions
        let refresh_claims = Claims {
            sub: account.id.to_string(),
            name: None,
            email: None,
            roles: Vec::new(),
            permissions: Vec::new(),
            tenant_id: Some(account.tenant_id.to_string()),
            jti: refresh_jti.clone(),
            iat: now.timestamp(),
            exp: refresh_exp.timestamp(),
            nbf: now.timestamp(),
            iss: self.config.jwt_issuer.clone(),
            aud: self.config.jwt_audience.clone(),
        };

        let key = EncodingKey::from_secret(self.config.jwt_secret.as_bytes());
        let access_token = encode(&Header::default(), &access_claims, &key)
            .map_err(|e| AuthError::TokenCreation(e.to_string()))?;
        let refresh_token = encode(&Header::default(), &refresh_claims, &key)
            .map_err(|e| AuthError::TokenCreation(e.to_string()))?;

        self.store_refresh_token(account.id, &refresh_jti, refresh_exp)
            .await?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: self.config.access_token_expiration.as_secs() as i64,
            refresh_expires_in: self.config.refresh_token_expiration.as_secs() as i64,
        })
    }

    /// Validate a JWT and return its claims
    pub async fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[self.config.jwt_audience.clone()]);
        validation.set_issuer(&[self.config.jwt_issuer.clone()]);
        validation.validate_nbf = true;

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })?;

        if self.is_token_blacklisted(&data.claims.jti).await {
            return Err(AuthError::RevokedToken);
        }

        Ok(data.claims)
    }

    /// Exchange a refresh token for a fresh pair, rotating the old one out.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let claims = self.validate_token(refresh_token).await?;
        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidToken)?;

        if !self.verify_refresh_token(user_id, &claims.jti).await? {
            return Err(AuthError::RevokedToken);
        }

        let account = self.get_user(user_id).await?;
        let new_tokens = self.generate_token(&account).await?;
        self.revoke_refresh_token(user_id, &claims.jti).await?;

        Ok(new_tokens)
    }

    /// Revoke an access token (adds it to the in-memory blacklist)
    pub async fn revoke_token(&self, token: &str) -> Result<(), AuthError> {
        let claims = self.validate_token(token).await?;
        let expiry = DateTime::from_timestamp(claims.exp, 0).unwrap_or_else(Utc::now);

        let mut blacklist = self.blacklisted_tokens.write().await;
        blacklist.push(BlacklistedToken {
            jti: claims.jti,
            expiry,
        });
        let now = Utc::now();
        blacklist.retain(|t| t.expiry > now);

        Ok(())
    }

    async fn is_token_blacklisted(&self, token_id: &str) -> bool {
        let blacklist = self.blacklisted_tokens.read().await;
        blacklist.iter().any(|t| t.jti == token_id)
    }

    async fn get_user(&self, user_id: Uuid) -> Result<user::Model, AuthError> {
        user::Entity::find_by_id(user_id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?
            .ok_or(AuthError::UserNotFound)
    }

    async fn store_refresh_token(
        &self,
        user_id: Uuid,
        token_id: &str,
        expiry: DateTime<Utc>,
    ) -> Result<(), AuthError> {
        refresh_token::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            token_id: Set(token_id.to_string()),
            expires_at: Set(expiry),
            revoked: Set(false),
            created_at: Set(Utc::now()),
        }
        .insert(self.db.as_ref())
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;
        debug!("stored refresh token {} for user {}", token_id, user_id);
        Ok(())
    }

    async fn verify_refresh_token(&self, user_id: Uuid, token_id: &str) -> Result<bool, AuthError> {
        let row = refresh_token::Entity::find()
            .filter(refresh_token::Column::UserId.eq(user_id))
            .filter(refresh_token::Column::TokenId.eq(token_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(matches!(row, Some(t) if !t.revoked && t.expires_at > Utc::now()))
    }

    async fn revoke_refresh_token(&self, user_id: Uuid, token_id: &str) -> Result<(), AuthError> {
        refresh_token::Entity::update_many()
            .col_expr(
                refresh_token::Column::Revoked,
                sea_orm::sea_query::Expr::value(true),
            )
            .filter(refresh_token::Column::UserId.eq(user_id))
            .filter(refresh_token::Column::TokenId.eq(token_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;
        Ok(())
    }
}

fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AuthError::InternalError(e.to_string()))
}

fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(hash).map_err(|e| AuthError::InternalError(e.to_string()))?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidCredentials)
}

/// Token pair response
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub refresh_expires_in: i64,
}

/// Login credentials
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

/// Registration payload
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    pub password: String,
}

/// Refresh token request
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Public view of an account
#[derive(Debug, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<&user::Model> for UserProfile {
    fn from(account: &user::Model) -> Self {
        Self {
            id: account.id,
            tenant_id: account.tenant_id,
            name: account.name.clone(),
            email: account.email.clone(),
        }
    }
}

/// Tokens plus profile, returned by register and login
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: UserProfile,
    #[serde(flatten)]
    pub tokens: TokenPair,
}

impl AuthSession {
    fn new(tokens: TokenPair, account: &user::Model) -> Self {
        Self {
            user: UserProfile::from(account),
            tokens,
        }
    }
}

/// Authentication error types
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing authentication")]
    MissingAuth,

    #[error("Invalid email or password.")]
    InvalidCredentials,

    #[error("This email is already registered. Please sign in.")]
    EmailTaken,

    #[error("Password must be at least 6 characters.")]
    WeakPassword,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Token has been revoked")]
    RevokedToken,

    #[error("Token creation failed: {0}")]
    TokenCreation(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, error_code, error_message): (StatusCode, &str, String) = match &self {
            Self::MissingAuth => (
                StatusCode::UNAUTHORIZED,
                "AUTH_MISSING",
                "Authentication required".to_string(),
            ),
            Self::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "AUTH_INVALID_CREDENTIALS",
                self.to_string(),
            ),
            Self::EmailTaken => (StatusCode::CONFLICT, "AUTH_EMAIL_TAKEN", self.to_string()),
            Self::WeakPassword => (
                StatusCode::BAD_REQUEST,
                "AUTH_WEAK_PASSWORD",
                self.to_string(),
            ),
            Self::Validation(msg) => (StatusCode::BAD_REQUEST, "AUTH_VALIDATION", msg.clone()),
            Self::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "AUTH_INVALID_TOKEN",
                "Invalid authentication token".to_string(),
            ),
            Self::TokenExpired => (
                StatusCode::UNAUTHORIZED,
                "AUTH_TOKEN_EXPIRED",
                "Token has expired".to_string(),
            ),
            Self::RevokedToken => (
                StatusCode::UNAUTHORIZED,
                "AUTH_REVOKED_TOKEN",
                "Authentication token has been revoked".to_string(),
            ),
            Self::TokenCreation(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "AUTH_TOKEN_CREATION_FAILED",
                msg.clone(),
            ),
            Self::UserNotFound => (
                StatusCode::NOT_FOUND,
                "AUTH_USER_NOT_FOUND",
                "User not found".to_string(),
            ),
            Self::InsufficientPermissions => (
                StatusCode::FORBIDDEN,
                "AUTH_INSUFFICIENT_PERMISSIONS",
                "Insufficient permissions".to_string(),
            ),
            Self::DatabaseError(_) | Self::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "AUTH_INTERNAL_ERROR",
                "Something went wrong. Please try again.".to_string(),
            ),
        };

        let body = Json(serde_json::json!({
            "error": {
                "code": error_code,
                "message": error_message,
            }
        }));

        (status, body).into_response()
    }
}

/// Permission middleware to check if a user has the required permission
pub async fn permission_middleware(
    State(required_permission): State<String>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let user = match request.extensions().get::<AuthUser>() {
        Some(user) => user.clone(),
        None => return Err(AuthError::MissingAuth),
    };

    // Admins have all permissions
    if user.is_admin() {
        return Ok(next.run(request).await);
    }

    if !user.has_permission(&required_permission) {
        return Err(AuthError::InsufficientPermissions);
    }

    Ok(next.run(request).await)
}

/// Authentication middleware that extracts and validates auth tokens
pub async fn auth_middleware(mut request: Request, next: Next) -> Response {
    let headers = request.headers().clone();

    let auth_service = match request.extensions().get::<Arc<AuthService>>() {
        Some(service) => service.clone(),
        None => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Authentication service not available",
            )
                .into_response();
        }
    };

    match extract_auth_from_headers(&headers, &auth_service).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}

/// Extract authentication info from request headers
async fn extract_auth_from_headers(
    headers: &HeaderMap,
    auth_service: &AuthService,
) -> Result<AuthUser, AuthError> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        if let Ok(auth_value) = auth_header.to_str() {
            if auth_value.starts_with("Bearer ") {
                let token = auth_value.trim_start_matches("Bearer ").trim();
                let claims = auth_service.validate_token(token).await?;

                return Ok(AuthUser {
                    user_id: claims.sub,
                    name: claims.name,
                    email: claims.email,
                    roles: claims.roles,
                    permissions: claims.permissions,
                    tenant_id: claims.tenant_id,
                    token_id: claims.jti,
                });
            }
        }
    }

    Err(AuthError::MissingAuth)
}

/// Extension methods for Router to add auth middleware
pub trait AuthRouterExt {
    fn with_auth(self) -> Self;
    fn with_permission(self, permission: &str) -> Self;
}

impl<S> AuthRouterExt for axum::Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_auth(self) -> Self {
        self.layer(axum::middleware::from_fn(auth_middleware))
    }

    fn with_permission(self, permission: &str) -> Self {
        self.layer(axum::middleware::from_fn_with_state(
            permission.to_string(),
            permission_middleware,
        ))
        .with_auth()
    }
}

/// Authentication routes
pub fn auth_routes(auth_service: Arc<AuthService>) -> axum::Router {
    use axum::routing::{get, post};

    let public = axum::Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/refresh", post(refresh_token_handler));

    let authenticated = axum::Router::new()
        .route("/logout", post(logout_handler))
        .route("/me", get(me_handler))
        .with_auth();

    public
        .merge(authenticated)
        .layer(axum::extract::DefaultBodyLimit::max(1024 * 64))
        .layer(Extension(auth_service.clone()))
        .with_state(auth_service)
}

async fn register_handler(
    State(auth_service): State<Arc<AuthService>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthSession>), AuthError> {
    let session = auth_service.register(request).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

async fn login_handler(
    State(auth_service): State<Arc<AuthService>>,
    Json(credentials): Json<LoginCredentials>,
) -> Result<Json<AuthSession>, AuthError> {
    let session = auth_service.login(credentials).await?;
    Ok(Json(session))
}

async fn refresh_token_handler(
    State(auth_service): State<Arc<AuthService>>,
    Json(request): Json<RefreshTokenRequest>,
) -> Result<Json<TokenPair>, AuthError> {
    let token_pair = auth_service.refresh_token(&request.refresh_token).await?;
    Ok(Json(token_pair))
}

async fn logout_handler(
    State(auth_service): State<Arc<AuthService>>,
    _user: AuthUser,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AuthError> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        if let Ok(auth_value) = auth_header.to_str() {
            if auth_value.starts_with("Bearer ") {
                let token = auth_value.trim_start_matches("Bearer ").trim();
                auth_service.revoke_token(token).await?;
                return Ok(Json(
                    serde_json::json!({ "message": "Successfully logged out" }),
                ));
            }
        }
    }

    Err(AuthError::MissingAuth)
}

async fn me_handler(
    State(auth_service): State<Arc<AuthService>>,
    user: AuthUser,
) -> Result<Json<UserProfile>, AuthError> {
    let user_id = Uuid::parse_str(&user.user_id).map_err(|_| AuthError::InvalidToken)?;
    let account = auth_service.get_user(user_id).await?;
    Ok(Json(UserProfile::from(&account)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hashing_roundtrip() {
        let hash = hash_password("s3cret!").unwrap();
        assert!(verify_password("s3cret!", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn tenant_context_requires_parseable_ids() {
        let user = AuthUser {
            user_id: Uuid::new_v4().to_string(),
            name: None,
            email: None,
            roles: vec![],
            permissions: vec![],
            tenant_id: Some(Uuid::new_v4().to_string()),
            token_id: "jti".into(),
        };
        assert!(TenantContext::from_auth(&user).is_ok());

        let mut bad = user.clone();
        bad.tenant_id = None;
        assert!(TenantContext::from_auth(&bad).is_err());
    }

    #[test]
    fn owner_permission_set_is_not_empty() {
        let perms = owner_permissions();
        assert!(perms.contains(&consts::SALES_CREATE.to_string()));
        assert!(perms.contains(&consts::LOGISTICS_MANAGE.to_string()));
    }
}
