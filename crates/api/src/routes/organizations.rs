//! Organization routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use huddle_db::{
    OrganizationRepository, entities::organizations, repositories::CreateOrganizationInput,
};
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::{
    AppState,
    error::ApiError,
    middleware::{Caller, Permission},
};

/// Creates the organizations router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/organizations",
            get(list_organizations).post(create_organization),
        )
        .route(
            "/organizations/{org_id}",
            get(get_organization).delete(delete_organization),
        )
}

/// Create organization request body.
#[derive(Debug, Deserialize)]
pub struct CreateOrganizationRequest {
    /// Name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Website.
    pub website: Option<String>,
    /// Contact email.
    pub contact_email: Option<String>,
    /// Contact phone.
    pub contact_phone: Option<String>,
    /// Whether the transparency report is public.
    #[serde(default)]
    pub is_public: bool,
}

async fn list_organizations(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let organizations = OrganizationRepository::new((*state.db).clone())
        .list()
        .await?;
    Ok(Json(json!({ "organizations": organizations })))
}

async fn create_organization(
    State(state): State<AppState>,
    caller: Caller,
    Json(payload): Json<CreateOrganizationRequest>,
) -> Result<(StatusCode, Json<organizations::Model>), ApiError> {
    caller.authorize(&state, Permission::ManageStructure)?;

    let org = OrganizationRepository::new((*state.db).clone())
        .create(CreateOrganizationInput {
            name: payload.name,
            description: payload.description,
            website: payload.website,
            contact_email: payload.contact_email,
            contact_phone: payload.contact_phone,
            is_public: payload.is_public,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(org)))
}

async fn get_organization(
    State(state): State<AppState>,
    Path(org_id): Path<Uuid>,
) -> Result<Json<organizations::Model>, ApiError> {
    OrganizationRepository::new((*state.db).clone())
        .find_by_id(org_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Organization not found: {org_id}")))
}

async fn delete_organization(
    State(state): State<AppState>,
    caller: Caller,
    Path(org_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    caller.authorize(&state, Permission::ManageStructure)?;
    OrganizationRepository::new((*state.db).clone())
        .delete(org_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
