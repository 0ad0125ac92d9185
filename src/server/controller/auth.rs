use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        user::{DevLoginForm, UserDto},
    },
    server::{
        error::{auth::AuthError, AppError},
        middleware::{
            auth::AuthGuard,
            session::{AuthSession, AuthSource, CsrfSession},
        },
        service::{
            auth::DiscordAuthService,
            user::{LoginKind, UserService},
        },
        state::AppState,
    },
};

use super::{ApiForm, AUTH_TAG};

/// Query parameters of the OAuth callback.
#[derive(Deserialize)]
pub struct CallbackParams {
    /// CSRF state token to be validated against the session value.
    pub state: String,
    /// Authorization code from Discord for the token exchange.
    pub code: String,
}

/// Redirect to the Discord login page.
#[utoipa::path(
    get,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    responses(
        (status = 307, description = "Redirect to Discord"),
        (status = 404, description = "Discord login is not configured", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let oauth_client = state
        .oauth_client
        .as_ref()
        .ok_or(AuthError::OAuthNotConfigured)?;

    let (url, csrf_token) = DiscordAuthService::new(&state.http_client, oauth_client).login_url();

    CsrfSession::new(&session)
        .set_token(csrf_token.secret().clone())
        .await?;

    Ok(Redirect::temporary(url.as_str()))
}

/// Complete the Discord login and redirect to the dashboard.
///
/// Users that are not a member of any guild the bot shares are turned away. New users start
/// pending until an application admin approves them.
#[utoipa::path(
    get,
    path = "/api/auth/callback",
    tag = AUTH_TAG,
    params(
        ("state" = String, Query, description = "CSRF state token"),
        ("code" = String, Query, description = "Authorization code")
    ),
    responses(
        (status = 303, description = "Logged in, redirect to the dashboard"),
        (status = 400, description = "CSRF validation failed", body = ErrorDto),
        (status = 403, description = "User shares no guild with the bot", body = ErrorDto),
        (status = 404, description = "Discord login is not configured", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> Result<impl IntoResponse, AppError> {
    let oauth_client = state
        .oauth_client
        .as_ref()
        .ok_or(AuthError::OAuthNotConfigured)?;

    validate_csrf(&session, &params.state).await?;

    let discord_user = DiscordAuthService::new(&state.http_client, oauth_client)
        .callback(params.code)
        .await?;

    if !state.discord.is_member_of_any_guild(discord_user.id).await {
        return Err(AuthError::NotInAnyGuild(discord_user.id).into());
    }

    let user = UserService::new(&state.db)
        .login(
            discord_user.id,
            discord_user.username,
            &state.admin_ids,
            LoginKind::Discord,
        )
        .await?;

    AuthSession::new(&session)
        .set_user(user.discord_id, AuthSource::Discord)
        .await?;

    Ok(Redirect::to("/"))
}

/// Log in with a numeric user id and the shared dev password.
///
/// Only available while the dev identity provider is active. The user is approved on login.
#[utoipa::path(
    post,
    path = "/api/auth/dev-login",
    tag = AUTH_TAG,
    request_body(content = DevLoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Logged in user", body = UserDto),
        (status = 401, description = "Invalid credentials", body = ErrorDto),
        (status = 404, description = "Dev login is disabled", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn dev_login(
    State(state): State<AppState>,
    session: Session,
    ApiForm(form): ApiForm<DevLoginForm>,
) -> Result<impl IntoResponse, AppError> {
    if !state.discord.is_dev() {
        return Err(AuthError::DevLoginDisabled.into());
    }

    let user_id = form
        .username
        .trim()
        .parse::<u64>()
        .map_err(|_| AuthError::InvalidCredentials)?;

    if form.password != *state.dev_login_password {
        return Err(AuthError::InvalidCredentials.into());
    }

    let username = state.discord.get_user_info(user_id).await.username;

    let user = UserService::new(&state.db)
        .login(user_id, username, &state.admin_ids, LoginKind::Dev)
        .await?;

    AuthSession::new(&session)
        .set_user(user.discord_id, AuthSource::Dev)
        .await?;

    let mut dto = user.into_dto();
    dto.source = Some(AuthSource::Dev.into_dto());

    Ok((StatusCode::OK, Json(dto)))
}

/// Clear the session and return to the landing page.
#[utoipa::path(
    get,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 303, description = "Logged out, redirect to the landing page")
    ),
)]
pub async fn logout(session: Session) -> Result<impl IntoResponse, AppError> {
    AuthSession::new(&session).clear().await;

    Ok(Redirect::to("/"))
}

/// The logged in user, whatever their registration status, with how they logged in.
#[utoipa::path(
    get,
    path = "/api/auth/user",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Logged in user", body = UserDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .current()
        .await?
        .ok_or(AuthError::UserNotInSession)?;

    let source = AuthSession::new(&session).get_source().await?;

    let mut dto = user.into_dto();
    dto.source = source.map(AuthSource::into_dto);

    Ok((StatusCode::OK, Json(dto)))
}

async fn validate_csrf(session: &Session, csrf_state: &str) -> Result<(), AppError> {
    let stored_state = CsrfSession::new(session).take_token().await?;

    match stored_state {
        Some(state) if state == csrf_state => Ok(()),
        _ => Err(AuthError::CsrfValidationFailed.into()),
    }
}
