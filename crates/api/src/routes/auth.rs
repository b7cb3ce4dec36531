//! Authentication routes for registration, login and the current user.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use huddle_core::auth::{UserRole, hash_password, verify_password};
use huddle_db::{UserRepository, entities::users, repositories::CreateUserInput};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{AppState, error::ApiError, middleware::AuthUser};

/// Creates the public auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

/// Auth routes that sit behind the token middleware.
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/auth/me", get(me))
}

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Login email.
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// Plain text password.
    pub password: String,
    /// `admin`, `coach` or `viewer`. Defaults to `viewer`.
    pub role: Option<String>,
    /// Phone number.
    pub phone_number: Option<String>,
    /// Organization to join.
    pub organization_id: Option<Uuid>,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Login email.
    pub email: String,
    /// Plain text password.
    pub password: String,
}

/// Token plus the user it was issued to.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// Signed JWT.
    pub access_token: String,
    /// Always `Bearer`.
    pub token_type: &'static str,
    /// Lifetime in seconds.
    pub expires_in: i64,
    /// The user.
    pub user: users::Model,
}

fn issue_token(state: &AppState, user: users::Model) -> Result<AuthResponse, ApiError> {
    let role = UserRole::from(user.role);
    let access_token =
        state
            .jwt_service
            .generate_access_token(user.id, user.organization_id, role.as_str())?;
    Ok(AuthResponse {
        access_token,
        token_type: "Bearer",
        expires_in: state.jwt_service.access_token_expires_in(),
        user,
    })
}

/// POST /auth/register - Create an account and return a token.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    if payload.email.trim().is_empty() {
        return Err(ApiError::validation("email is required"));
    }
    if payload.full_name.trim().is_empty() {
        return Err(ApiError::validation("full_name is required"));
    }
    let role = match payload.role.as_deref() {
        Some(role) => role.parse::<UserRole>().map_err(ApiError::validation)?,
        None => UserRole::default(),
    };

    let password_hash = hash_password(&payload.password)?;
    let user = UserRepository::new((*state.db).clone())
        .create(CreateUserInput {
            email: payload.email,
            full_name: payload.full_name,
            password_hash,
            role,
            phone_number: payload.phone_number,
            organization_id: payload.organization_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(issue_token(&state, user)?)))
}

/// POST /auth/login - Exchange credentials for a token.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let invalid = || ApiError::unauthorized("Invalid email or password");

    let Some(user) = UserRepository::new((*state.db).clone())
        .find_by_email(&payload.email)
        .await?
    else {
        info!(email = %payload.email, "Login attempt for non-existent user");
        return Err(invalid());
    };

    if !user.is_active {
        return Err(ApiError::unauthorized("This account has been disabled"));
    }
    if !verify_password(&payload.password, &user.password_hash)? {
        info!(user_id = %user.id, "Failed login attempt - invalid password");
        return Err(invalid());
    }

    info!(user_id = %user.id, "User logged in");
    Ok(Json(issue_token(&state, user)?))
}

/// GET /auth/me - The authenticated user.
async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<users::Model>, ApiError> {
    UserRepository::new((*state.db).clone())
        .find_by_id(auth.user_id())
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::unauthorized("User no longer exists"))
}
