//! Application user registration and approval.

use entity::user::{UserRole, UserStatus};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::AppError,
    model::user::{UpsertUserParam, User},
};

/// How a user proved their identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginKind {
    /// Discord OAuth. New users wait for approval.
    Discord,
    /// Dev form login. The user is approved immediately.
    Dev,
}

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a login and returns the stored user.
    ///
    /// The first user to log in while no admin exists becomes an approved admin, as does any
    /// user listed in `admin_ids`. Otherwise existing users keep their status and role and
    /// only the username is refreshed.
    ///
    /// # Arguments
    /// - `discord_id` - Discord id of the user
    /// - `username` - Current Discord username
    /// - `admin_ids` - Configured application admins
    /// - `kind` - Login method, dev logins are approved on the spot
    pub async fn login(
        &self,
        discord_id: u64,
        username: String,
        admin_ids: &[u64],
        kind: LoginKind,
    ) -> Result<User, AppError> {
        let user_repo = UserRepository::new(self.db);

        let bootstrap = !user_repo.admin_exists().await?;
        let listed = admin_ids.contains(&discord_id);

        let (status, role) = if bootstrap || listed {
            (Some(UserStatus::Approved), Some(UserRole::Admin))
        } else if kind == LoginKind::Dev {
            (Some(UserStatus::Approved), None)
        } else {
            (None, None)
        };

        let user = user_repo
            .upsert(UpsertUserParam {
                discord_id,
                username,
                status,
                role,
            })
            .await?;

        if bootstrap {
            tracing::info!(
                "No admin existed, user {} ({}) became the first admin",
                user.discord_id,
                user.username
            );
        } else {
            tracing::debug!("User {} logged in with status {:?}", user.discord_id, user.status);
        }

        Ok(user)
    }

    /// Users waiting for approval, oldest first.
    pub async fn get_pending_requests(&self) -> Result<Vec<User>, AppError> {
        UserRepository::new(self.db)
            .get_by_status(UserStatus::Pending)
            .await
    }

    /// Approves a user with the given role.
    ///
    /// # Returns
    /// - `Ok(User)` - The approved user
    /// - `Err(AppError::NotFound)` - No user with that id
    pub async fn approve(&self, discord_id: u64, role: UserRole) -> Result<User, AppError> {
        let user = UserRepository::new(self.db)
            .set_access(discord_id, UserStatus::Approved, Some(role))
            .await?
            .ok_or_else(user_not_found)?;

        tracing::info!("Approved user {} as {:?}", discord_id, role);

        Ok(user)
    }

    /// Denies a user's registration, keeping their role.
    ///
    /// # Returns
    /// - `Ok(User)` - The denied user
    /// - `Err(AppError::NotFound)` - No user with that id
    pub async fn deny(&self, discord_id: u64) -> Result<User, AppError> {
        let user = UserRepository::new(self.db)
            .set_access(discord_id, UserStatus::Denied, None)
            .await?
            .ok_or_else(user_not_found)?;

        tracing::info!("Denied user {}", discord_id);

        Ok(user)
    }
}

fn user_not_found() -> AppError {
    AppError::NotFound("User not found".to_string())
}
