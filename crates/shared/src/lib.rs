//! Shared configuration, errors and token handling for Huddle.
//!
//! This crate provides the pieces every other crate leans on:
//! - Layered application configuration
//! - The application-wide error taxonomy
//! - JWT claims and the token service

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;

pub use auth::Claims;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use jwt::{JwtError, JwtService};
