//! User repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};
use tracing::info;
use uuid::Uuid;

use huddle_core::auth::UserRole;

use crate::entities::{organizations, users};

/// Error types for user operations.
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    /// Another account already uses the email.
    #[error("Email already registered: {0}")]
    EmailTaken(String),

    /// Organization not found.
    #[error("Organization not found: {0}")]
    OrganizationNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a user. The password must already be hashed.
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    /// Login email, stored lowercased.
    pub email: String,
    /// Full name.
    pub full_name: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    /// Role.
    pub role: UserRole,
    /// Phone number.
    pub phone_number: Option<String>,
    /// Organization the user belongs to.
    pub organization_id: Option<Uuid>,
}

/// User repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by email, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Email.eq(normalize_email(email)))
            .one(&self.db)
            .await
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id).one(&self.db).await
    }

    /// Creates a new user.
    ///
    /// # Errors
    ///
    /// Returns `EmailTaken` for a duplicate email and `OrganizationNotFound`
    /// for a dangling organization.
    pub async fn create(&self, input: CreateUserInput) -> Result<users::Model, UserError> {
        let email = normalize_email(&input.email);
        if self.find_by_email(&email).await?.is_some() {
            return Err(UserError::EmailTaken(email));
        }

        if let Some(org_id) = input.organization_id {
            organizations::Entity::find_by_id(org_id)
                .one(&self.db)
                .await?
                .ok_or(UserError::OrganizationNotFound(org_id))?;
        }

        let user = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email),
            full_name: Set(input.full_name),
            password_hash: Set(input.password_hash),
            role: Set(input.role.into()),
            phone_number: Set(input.phone_number),
            organization_id: Set(input.organization_id),
            is_active: Set(true),
            created_at: Set(chrono::Utc::now().into()),
        }
        .insert(&self.db)
        .await?;

        info!(user_id = %user.id, role = %input.role, "User registered");
        Ok(user)
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
