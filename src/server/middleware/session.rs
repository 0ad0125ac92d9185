//! Type-safe session management wrappers.
//!
//! Each struct wraps the same underlying `Session` but exposes only the methods relevant to
//! its concern:
//! - `AuthSession` - Logged in user and how they logged in
//! - `CsrfSession` - CSRF token for the OAuth flow

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::{
    model::user::LoginSourceDto,
    server::{error::AppError, util::parse::parse_u64_from_string},
};

// Session key constants
const SESSION_AUTH_USER_ID: &str = "auth:user";
const SESSION_AUTH_SOURCE: &str = "auth:source";
const SESSION_AUTH_CSRF_TOKEN: &str = "auth:csrf_token";

/// How the user in the session authenticated.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AuthSource {
    Discord,
    Dev,
}

impl AuthSource {
    pub fn into_dto(self) -> LoginSourceDto {
        match self {
            Self::Discord => LoginSourceDto::Discord,
            Self::Dev => LoginSourceDto::Dev,
        }
    }
}

/// Authentication session management.
///
/// Stores the authenticated user's Discord ID together with the login source.
pub struct AuthSession<'a> {
    session: &'a Session,
}

impl<'a> AuthSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Stores the user's Discord ID and login source in the session.
    ///
    /// The ID is stored as a string so it survives JSON session serialization without
    /// losing precision.
    ///
    /// # Returns
    /// - `Ok(())` - User stored
    /// - `Err(AppError::SessionErr(_))` - Failed to store in session
    pub async fn set_user(&self, user_id: u64, source: AuthSource) -> Result<(), AppError> {
        self.session
            .insert(SESSION_AUTH_USER_ID, user_id.to_string())
            .await?;
        self.session.insert(SESSION_AUTH_SOURCE, source).await?;
        Ok(())
    }

    /// Retrieves the user's Discord ID from the session.
    ///
    /// # Returns
    /// - `Ok(Some(user_id))` - User is logged in
    /// - `Ok(None)` - No user in session
    /// - `Err(AppError::SessionErr(_))` - Failed to access session
    /// - `Err(AppError::InternalErr(_))` - Stored ID is not numeric
    pub async fn get_user_id(&self) -> Result<Option<u64>, AppError> {
        let Some(user_id) = self.session.get::<String>(SESSION_AUTH_USER_ID).await? else {
            return Ok(None);
        };

        Ok(Some(parse_u64_from_string(user_id)?))
    }

    /// Login source of the session user, `None` when nobody is logged in.
    pub async fn get_source(&self) -> Result<Option<AuthSource>, AppError> {
        Ok(self.session.get::<AuthSource>(SESSION_AUTH_SOURCE).await?)
    }

    pub async fn is_authenticated(&self) -> Result<bool, AppError> {
        Ok(self.get_user_id().await?.is_some())
    }

    /// Clears all data from the session.
    pub async fn clear(&self) {
        self.session.clear().await;
    }
}

/// CSRF protection session management.
///
/// Tokens are stored when the OAuth login starts and validated during the callback.
pub struct CsrfSession<'a> {
    session: &'a Session,
}

impl<'a> CsrfSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub async fn set_token(&self, token: String) -> Result<(), AppError> {
        self.session.insert(SESSION_AUTH_CSRF_TOKEN, token).await?;
        Ok(())
    }

    /// Retrieves and removes the CSRF token so each token validates once.
    ///
    /// # Returns
    /// - `Ok(Some(token))` - Token found and removed
    /// - `Ok(None)` - No token in session
    /// - `Err(AppError::SessionErr(_))` - Failed to access session
    pub async fn take_token(&self) -> Result<Option<String>, AppError> {
        let token = self.session.remove(SESSION_AUTH_CSRF_TOKEN).await?;
        Ok(token)
    }
}
