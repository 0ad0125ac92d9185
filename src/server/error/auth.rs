use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use oauth2::{
    basic::BasicErrorResponseType, HttpClientError, RequestTokenError, StandardErrorResponse,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No user id is stored in the session.
    #[error("User not found in session")]
    UserNotInSession,

    /// The session refers to a user id with no database record.
    #[error("User {0} not found in database")]
    UserNotInDatabase(u64),

    /// The user is approved but lacks the required application permission.
    #[error("User {0} denied access: {1}")]
    AccessDenied(u64, String),

    /// The user registered but an admin has not approved them yet.
    #[error("User {0} is awaiting approval")]
    AccountPending(u64),

    /// An admin denied the user's registration.
    #[error("User {0} registration was denied")]
    AccountDenied(u64),

    /// The user shares no guild with the bot.
    #[error("User {0} is not a member of any guild served by this application")]
    NotInAnyGuild(u64),

    /// CSRF state validation failed during OAuth callback.
    ///
    /// The CSRF state token in the OAuth callback URL does not match the token stored
    /// in the session. Results in a 400 Bad Request response.
    #[error("Failed to login user due to CSRF state mismatch")]
    CsrfValidationFailed,

    /// Dev login username was not a numeric id or the password did not match.
    #[error("Invalid dev login credentials")]
    InvalidCredentials,

    /// Dev login was requested while the live identity provider is active.
    #[error("Dev login is disabled")]
    DevLoginDisabled,

    /// OAuth login was requested without Discord client credentials configured.
    #[error("Discord OAuth is not configured")]
    OAuthNotConfigured,

    /// Exchanging the OAuth authorization code for a token failed.
    #[error("Failed to exchange OAuth code: {0}")]
    RequestTokenErr(
        #[from]
        RequestTokenError<
            HttpClientError<reqwest::Error>,
            StandardErrorResponse<BasicErrorResponseType>,
        >,
    ),
}

/// Converts authentication errors into HTTP responses.
///
/// - `UserNotInSession` / `UserNotInDatabase` / `InvalidCredentials` → 401 Unauthorized
/// - `AccessDenied` / `AccountPending` / `AccountDenied` / `NotInAnyGuild` → 403 Forbidden
/// - `CsrfValidationFailed` → 400 Bad Request
/// - `DevLoginDisabled` / `OAuthNotConfigured` → 404 Not Found
/// - `RequestTokenErr` → 500 Internal Server Error with generic message
///
/// All errors are logged at debug level, client-facing messages stay generic.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let (status, message) = match self {
            Self::UserNotInSession | Self::UserNotInDatabase(_) => {
                (StatusCode::UNAUTHORIZED, "Not logged in")
            }
            Self::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid username or password"),
            Self::AccessDenied(_, _) => (StatusCode::FORBIDDEN, "Insufficient permissions"),
            Self::AccountPending(_) => (StatusCode::FORBIDDEN, "Your account is awaiting approval"),
            Self::AccountDenied(_) => (StatusCode::FORBIDDEN, "Your account request was denied"),
            Self::NotInAnyGuild(_) => (
                StatusCode::FORBIDDEN,
                "You must be a member of a Discord server using this application",
            ),
            Self::CsrfValidationFailed => (
                StatusCode::BAD_REQUEST,
                "There was an issue logging you in, please try again.",
            ),
            Self::DevLoginDisabled | Self::OAuthNotConfigured => {
                (StatusCode::NOT_FOUND, "Not found")
            }
            Self::RequestTokenErr(err) => {
                tracing::error!("OAuth token exchange failed: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (
            status,
            Json(ErrorDto {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}
