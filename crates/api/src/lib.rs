//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes under `/api/v1`
//! - Bearer token middleware and the caller extractor
//! - JSON error mapping for every repository error

pub mod error;
pub mod middleware;
pub mod routes;

use axum::Router;
use huddle_db::repositories::DEFAULT_BATCH_SIZE;
use huddle_shared::JwtService;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Whether protected routes require a bearer token and role checks apply.
    pub auth_enabled: bool,
    /// Rows per committed batch for CSV imports.
    pub import_batch_size: usize,
}

impl AppState {
    /// Creates state with auth disabled and the default import batch size.
    #[must_use]
    pub fn new(db: DatabaseConnection, jwt_service: JwtService) -> Self {
        Self {
            db: Arc::new(db),
            jwt_service: Arc::new(jwt_service),
            auth_enabled: false,
            import_batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Sets whether authentication is enforced.
    #[must_use]
    pub const fn with_auth(mut self, enabled: bool) -> Self {
        self.auth_enabled = enabled;
        self
    }

    /// Sets the CSV import batch size.
    #[must_use]
    pub const fn with_import_batch_size(mut self, batch_size: usize) -> Self {
        self.import_batch_size = batch_size;
        self
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
