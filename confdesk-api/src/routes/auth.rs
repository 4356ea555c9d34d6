/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /v1/auth/register` - Register new user
/// - `POST /v1/auth/login` - Login and get tokens
/// - `POST /v1/auth/refresh` - Refresh access token
///
/// Registration runs the full domain-validation chain (password
/// confirmation, name charset, email-domain allow-list) before touching
/// the database, and always assigns the default `participant` role;
/// committee membership is granted separately.

use crate::{
    app::AppState,
    error::{request_validation_error, ApiError, ApiResult, ValidationErrorDetail},
};
use axum::{extract::State, Json};
use confdesk_shared::{
    auth::{jwt, password},
    models::user::{CreateUser, User, UserRole},
    validate,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Login name
    #[validate(length(min = 1, max = 100, message = "Username must be 1-100 characters"))]
    pub username: String,

    /// Given name
    #[validate(length(min = 1, max = 100, message = "First name must be 1-100 characters"))]
    pub first_name: String,

    /// Family name
    #[validate(length(min = 1, max = 100, message = "Last name must be 1-100 characters"))]
    pub last_name: String,

    /// Email address; the domain must be on the allow-list
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Password confirmation
    pub password_confirm: String,

    /// University or organization
    #[validate(length(min = 1, max = 255, message = "Affiliation must be 1-255 characters"))]
    pub affiliation: String,

    /// Nationality
    #[validate(length(min = 1, max = 255, message = "Nationality must be 1-255 characters"))]
    pub nationality: String,
}

/// Register response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// Generated user identifier (`USER` + 4 hex chars)
    pub user_id: String,

    /// Access token (24h)
    pub access_token: String,

    /// Refresh token (30d)
    pub refresh_token: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// User identifier
    pub user_id: String,

    /// Access token (24h)
    pub access_token: String,

    /// Refresh token (30d)
    pub refresh_token: String,
}

/// Refresh token request
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token
    pub refresh_token: String,
}

/// Refresh token response
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    /// New access token (24h)
    pub access_token: String,
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /v1/auth/register
/// Content-Type: application/json
///
/// {
///   "username": "ana",
///   "first_name": "Ana",
///   "last_name": "Li",
///   "email": "x@tek.tn",
///   "password": "SecureP@ss123",
///   "password_confirm": "SecureP@ss123",
///   "affiliation": "Tek Institute",
///   "nationality": "Tunisian"
/// }
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: validation failed (domain not allowed,
///   bad name charset, mismatched passwords, weak password)
/// - `409 Conflict`: email or username already exists
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<RegisterResponse>> {
    req.validate().map_err(request_validation_error)?;

    // Domain validation chain, all before any database work
    validate::passwords_match(&req.password, &req.password_confirm)?;
    validate::name("first_name", &req.first_name)?;
    validate::name("last_name", &req.last_name)?;
    validate::email_domain(&req.email, state.allowed_domains())?;

    password::validate_password_strength(&req.password).map_err(|message| {
        ApiError::ValidationFailed(vec![ValidationErrorDetail {
            field: "password".to_string(),
            message,
        }])
    })?;

    let password_hash = password::hash_password(&req.password)?;

    // Every new account starts as a participant
    let user = User::create(
        &state.db,
        CreateUser {
            username: req.username,
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            password_hash,
            role: UserRole::Participant,
            affiliation: req.affiliation,
            nationality: req.nationality,
        },
    )
    .await?;

    let access_claims = jwt::Claims::new(user.user_id.clone(), user.role, jwt::TokenType::Access);
    let refresh_claims = jwt::Claims::new(user.user_id.clone(), user.role, jwt::TokenType::Refresh);

    let access_token = jwt::create_token(&access_claims, state.jwt_secret())?;
    let refresh_token = jwt::create_token(&refresh_claims, state.jwt_secret())?;

    Ok(Json(RegisterResponse {
        user_id: user.user_id,
        access_token,
        refresh_token,
    }))
}

/// Login endpoint
///
/// Authenticates by email and password, returning JWT tokens.
///
/// # Errors
///
/// - `401 Unauthorized`: unknown email or wrong password (indistinguishable
///   on purpose)
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    req.validate().map_err(request_validation_error)?;

    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized("Invalid email or password".to_string()));
    }

    let access_claims = jwt::Claims::new(user.user_id.clone(), user.role, jwt::TokenType::Access);
    let refresh_claims = jwt::Claims::new(user.user_id.clone(), user.role, jwt::TokenType::Refresh);

    let access_token = jwt::create_token(&access_claims, state.jwt_secret())?;
    let refresh_token = jwt::create_token(&refresh_claims, state.jwt_secret())?;

    tracing::info!(user_id = %user.user_id, "user logged in");

    Ok(Json(LoginResponse {
        user_id: user.user_id,
        access_token,
        refresh_token,
    }))
}

/// Refresh endpoint
///
/// Exchanges a valid refresh token for a new access token. The role is
/// re-read from the database so a promotion or demotion takes effect on
/// the next refresh.
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> ApiResult<Json<RefreshResponse>> {
    let claims = jwt::validate_refresh_token(&req.refresh_token, state.jwt_secret())?;

    let user = User::find_by_id(&state.db, &claims.sub)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Account no longer exists".to_string()))?;

    let access_claims = jwt::Claims::new(user.user_id, user.role, jwt::TokenType::Access);
    let access_token = jwt::create_token(&access_claims, state.jwt_secret())?;

    Ok(Json(RefreshResponse { access_token }))
}
