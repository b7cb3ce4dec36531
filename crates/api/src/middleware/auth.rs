//! Authentication middleware for protected routes.

use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use huddle_core::auth::UserRole;
use huddle_shared::{Claims, JwtError};
use serde_json::json;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

fn reject(error: &str, message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": error, "message": message })),
    )
        .into_response()
}

/// Authentication middleware that validates JWT tokens.
///
/// A valid bearer token stores its claims in the request extensions. An
/// invalid or expired token is always rejected. A missing token is rejected
/// only when authentication is enabled; otherwise the request continues and
/// handlers see an anonymous [`Caller`].
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(bearer) = request.headers().typed_get::<Authorization<Bearer>>() else {
        if state.auth_enabled {
            return reject(
                "missing_token",
                "Authorization header with Bearer token is required",
            );
        }
        return next.run(request).await;
    };

    match state.jwt_service.validate_token(bearer.token()) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(JwtError::Expired) => reject("token_expired", "Token has expired"),
        Err(_) => reject("invalid_token", "Invalid or malformed token"),
    }
}

/// What a mutating route requires of the caller's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Organizations, seasons, teams, budgets and imports. Admin only.
    ManageStructure,
    /// Expenses, revenues, players and quick actions. Admin or coach.
    RecordFinances,
}

impl Permission {
    const fn allows(self, role: UserRole) -> bool {
        match self {
            Self::ManageStructure => role.can_manage_structure(),
            Self::RecordFinances => role.can_record_finances(),
        }
    }
}

/// Who is making the request.
#[derive(Debug, Clone)]
pub enum Caller {
    /// A caller with a valid token.
    Authenticated(Claims),
    /// No token was sent and authentication is disabled.
    Anonymous,
}

impl Caller {
    /// User ID of an authenticated caller.
    #[must_use]
    pub const fn user_id(&self) -> Option<Uuid> {
        match self {
            Self::Authenticated(claims) => Some(claims.user_id()),
            Self::Anonymous => None,
        }
    }

    /// Checks the caller's role against a permission.
    ///
    /// Role checks only apply while authentication is enabled.
    pub fn authorize(&self, state: &AppState, permission: Permission) -> Result<(), ApiError> {
        if !state.auth_enabled {
            return Ok(());
        }
        let Self::Authenticated(claims) = self else {
            return Err(ApiError::unauthorized("Authentication required"));
        };
        let role: UserRole = claims
            .role
            .parse()
            .map_err(|_| ApiError::forbidden(format!("Unknown role '{}'", claims.role)))?;
        if permission.allows(role) {
            Ok(())
        } else {
            Err(ApiError::forbidden(format!(
                "Role '{role}' is not allowed to perform this action"
            )))
        }
    }
}

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map_or(Self::Anonymous, Self::Authenticated))
    }
}

/// Extractor for authenticated user claims. Rejects anonymous callers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Returns the user ID from the claims.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.0.user_id()
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}
