//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for managing application user records,
//! including the upsert performed at login and the status/role changes made by admins.

use chrono::Utc;
use entity::user::{UserRole, UserStatus};
use migration::OnConflict;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};

use crate::server::{
    error::AppError,
    model::user::{UpsertUserParam, User},
};

/// Repository providing database operations for user management.
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `UserRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Upserts a user from parameter model.
    ///
    /// Inserts a new user or refreshes an existing user's username. Status and role are
    /// only overwritten when explicitly provided (Some value), preventing a regular login
    /// from resetting an approval or revoking admin privileges.
    ///
    /// # Arguments
    /// - `param` - Discord id, username and optional status/role
    ///
    /// # Returns
    /// - `Ok(User)` - The created or updated user
    /// - `Err(AppError::DbErr)` - Database error during insert or update
    pub async fn upsert(&self, param: UpsertUserParam) -> Result<User, AppError> {
        let mut update_columns = vec![entity::user::Column::Username];

        if param.status.is_some() {
            update_columns.push(entity::user::Column::Status);
        }
        if param.role.is_some() {
            update_columns.push(entity::user::Column::Role);
        }

        let entity = entity::prelude::User::insert(entity::user::ActiveModel {
            discord_id: ActiveValue::Set(param.discord_id.to_string()),
            username: ActiveValue::Set(param.username),
            status: ActiveValue::Set(param.status.unwrap_or(UserStatus::Pending)),
            role: ActiveValue::Set(param.role.unwrap_or(UserRole::User)),
            created_at: ActiveValue::Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::column(entity::user::Column::DiscordId)
                .update_columns(update_columns)
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        User::from_entity(entity)
    }

    /// Finds a user by their Discord ID.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - User found
    /// - `Ok(None)` - No user found with that Discord ID
    /// - `Err(AppError)` - Database error during query
    pub async fn find_by_discord_id(&self, user_id: u64) -> Result<Option<User>, AppError> {
        let entity = entity::prelude::User::find_by_id(user_id.to_string())
            .one(self.db)
            .await?;

        entity.map(User::from_entity).transpose()
    }

    /// Checks if any admin users exist in the database.
    ///
    /// Used at login to decide whether the first user should bootstrap as admin.
    ///
    /// # Returns
    /// - `Ok(true)` - At least one admin user exists in the database
    /// - `Ok(false)` - No admin users exist (first-time setup scenario)
    /// - `Err(AppError)` - Database error during count query
    pub async fn admin_exists(&self) -> Result<bool, AppError> {
        let admin_count = entity::prelude::User::find()
            .filter(entity::user::Column::Role.eq(UserRole::Admin))
            .count(self.db)
            .await?;

        Ok(admin_count > 0)
    }

    /// Gets every user with the given status, oldest registration first.
    pub async fn get_by_status(&self, status: UserStatus) -> Result<Vec<User>, AppError> {
        let entities = entity::prelude::User::find()
            .filter(entity::user::Column::Status.eq(status))
            .order_by_asc(entity::user::Column::CreatedAt)
            .all(self.db)
            .await?;

        entities.into_iter().map(User::from_entity).collect()
    }

    /// Sets the status of an existing user and, when `Some`, its role.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - The updated user
    /// - `Ok(None)` - No user with that Discord ID exists
    /// - `Err(AppError)` - Database error during update
    pub async fn set_access(
        &self,
        user_id: u64,
        status: UserStatus,
        role: Option<UserRole>,
    ) -> Result<Option<User>, AppError> {
        let Some(entity) = entity::prelude::User::find_by_id(user_id.to_string())
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: entity::user::ActiveModel = entity.into();
        active_model.status = ActiveValue::Set(status);
        if let Some(role) = role {
            active_model.role = ActiveValue::Set(role);
        }

        let updated = active_model.update(self.db).await?;

        User::from_entity(updated).map(Some)
    }
}
