//! Request middleware.

pub mod auth;

pub use auth::{AuthUser, Caller, Permission, auth_middleware};
