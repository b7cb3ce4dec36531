//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth_middleware};

pub mod auth;
pub mod budgets;
pub mod expenses;
pub mod health;
pub mod imports;
pub mod organizations;
pub mod players;
pub mod quick;
pub mod revenues;
pub mod seasons;
pub mod teams;
pub mod transparency;

/// Creates the public API router.
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(health::routes()).merge(auth::routes())
}

/// Creates the API router with protected routes that need state for middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(auth::protected_routes())
        .merge(organizations::routes())
        .merge(seasons::routes())
        .merge(teams::routes())
        .merge(players::routes())
        .merge(budgets::routes())
        .merge(expenses::routes())
        .merge(revenues::routes())
        .merge(quick::routes())
        .merge(transparency::routes())
        .merge(imports::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    api_routes().merge(protected_routes)
}
