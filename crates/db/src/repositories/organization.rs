//! Organization repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait, sea_query::Expr,
};
use tracing::info;
use uuid::Uuid;

use huddle_core::validation::{self, ValidationError};

use super::cascade;
use crate::entities::{organizations, seasons, users};

/// Error types for organization operations.
#[derive(Debug, thiserror::Error)]
pub enum OrganizationError {
    /// Organization not found.
    #[error("Organization not found: {0}")]
    NotFound(Uuid),

    /// Input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an organization.
#[derive(Debug, Clone, Default)]
pub struct CreateOrganizationInput {
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Public website.
    pub website: Option<String>,
    /// Contact email.
    pub contact_email: Option<String>,
    /// Contact phone.
    pub contact_phone: Option<String>,
    /// Whether reports may be shown publicly.
    pub is_public: bool,
}

impl CreateOrganizationInput {
    pub(crate) fn into_active_model(self) -> organizations::ActiveModel {
        organizations::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(self.name),
            description: Set(self.description),
            website: Set(self.website),
            contact_email: Set(self.contact_email),
            contact_phone: Set(self.contact_phone),
            is_public: Set(self.is_public),
            created_at: Set(chrono::Utc::now().into()),
        }
    }
}

/// Organization repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct OrganizationRepository {
    db: DatabaseConnection,
}

impl OrganizationRepository {
    /// Creates a new organization repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all organizations by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<organizations::Model>, DbErr> {
        organizations::Entity::find()
            .order_by_asc(organizations::Column::Name)
            .all(&self.db)
            .await
    }

    /// Finds an organization by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<organizations::Model>, DbErr> {
        organizations::Entity::find_by_id(id).one(&self.db).await
    }

    /// Creates an organization.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for a blank name, or a database error.
    pub async fn create(
        &self,
        input: CreateOrganizationInput,
    ) -> Result<organizations::Model, OrganizationError> {
        validation::required("name", &input.name)?;

        let org = input.into_active_model().insert(&self.db).await?;
        info!(organization_id = %org.id, "Organization created");
        Ok(org)
    }

    /// Deletes an organization together with its seasons and everything
    /// under them. Members stay, detached from the organization.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the organization does not exist.
    pub async fn delete(&self, id: Uuid) -> Result<(), OrganizationError> {
        let txn = self.db.begin().await?;

        organizations::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(OrganizationError::NotFound(id))?;

        let season_ids: Vec<Uuid> = seasons::Entity::find()
            .filter(seasons::Column::OrganizationId.eq(id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|s| s.id)
            .collect();
        for season_id in &season_ids {
            cascade::delete_season(&txn, *season_id).await?;
        }

        users::Entity::update_many()
            .col_expr(users::Column::OrganizationId, Expr::value(Option::<Uuid>::None))
            .filter(users::Column::OrganizationId.eq(id))
            .exec(&txn)
            .await?;

        organizations::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        info!(organization_id = %id, seasons = season_ids.len(), "Organization deleted");
        Ok(())
    }
}
