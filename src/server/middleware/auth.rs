use entity::user::UserStatus;
use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    middleware::session::AuthSession,
    model::user::User,
};

pub enum Permission {
    /// Application admin role, required to approve or deny registrations.
    Admin,
}

/// Resolves the session user and checks that they may use the application.
pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, session: &'a Session) -> Self {
        Self { db, session }
    }

    /// Requires an approved session user holding every listed permission.
    ///
    /// # Returns
    /// - `Ok(User)` - The approved user
    /// - `Err(AuthError::UserNotInSession)` - Nobody is logged in
    /// - `Err(AuthError::UserNotInDatabase)` - Session user has no record
    /// - `Err(AuthError::AccountPending | AccountDenied)` - User is not approved
    /// - `Err(AuthError::AccessDenied)` - A permission is missing
    pub async fn require(&self, permissions: &[Permission]) -> Result<User, AppError> {
        let user_repo = UserRepository::new(self.db);

        let Some(user_id) = AuthSession::new(self.session).get_user_id().await? else {
            return Err(AuthError::UserNotInSession.into());
        };

        let Some(user) = user_repo.find_by_discord_id(user_id).await? else {
            return Err(AuthError::UserNotInDatabase(user_id).into());
        };

        match user.status {
            UserStatus::Approved => {}
            UserStatus::Pending => return Err(AuthError::AccountPending(user_id).into()),
            UserStatus::Denied => return Err(AuthError::AccountDenied(user_id).into()),
        }

        for permission in permissions {
            match permission {
                Permission::Admin => {
                    if !user.is_admin() {
                        return Err(AuthError::AccessDenied(
                            user_id,
                            "User attempted an application admin action without the admin role"
                                .to_string(),
                        )
                        .into());
                    }
                }
            }
        }

        Ok(user)
    }

    /// Returns the session user without requiring approval, for status endpoints.
    pub async fn current(&self) -> Result<Option<User>, AppError> {
        let Some(user_id) = AuthSession::new(self.session).get_user_id().await? else {
            return Ok(None);
        };

        UserRepository::new(self.db).find_by_discord_id(user_id).await
    }
}
