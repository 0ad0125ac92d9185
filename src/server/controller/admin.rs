use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        user::{ApproveUserForm, DenyUserForm, UserDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::user::role_from_dto,
        service::user::UserService,
        state::AppState,
    },
};

use super::{parse_client_id, ApiForm, ADMIN_TAG};

/// Registrations waiting for approval, oldest first.
///
/// # Access Control
/// - `Admin` - Application admins only
#[utoipa::path(
    get,
    path = "/api/admin/requests",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Pending users", body = Vec<UserDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an application admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_requests(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let users: Vec<UserDto> = UserService::new(&state.db)
        .get_pending_requests()
        .await?
        .into_iter()
        .map(|user| user.into_dto())
        .collect();

    Ok((StatusCode::OK, Json(users)))
}

/// Approve a registration with the given role.
///
/// # Access Control
/// - `Admin` - Application admins only
#[utoipa::path(
    post,
    path = "/api/admin/approve",
    tag = ADMIN_TAG,
    request_body(content = ApproveUserForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Approved user", body = UserDto),
        (status = 400, description = "Malformed id or role", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an application admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn approve(
    State(state): State<AppState>,
    session: Session,
    ApiForm(form): ApiForm<ApproveUserForm>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let discord_id = parse_client_id("discordId", &form.discord_id)?;
    let role = role_from_dto(form.role)?;

    let user = UserService::new(&state.db).approve(discord_id, role).await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Deny a registration.
///
/// # Access Control
/// - `Admin` - Application admins only
#[utoipa::path(
    post,
    path = "/api/admin/deny",
    tag = ADMIN_TAG,
    request_body(content = DenyUserForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Denied user", body = UserDto),
        (status = 400, description = "Malformed id", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an application admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn deny(
    State(state): State<AppState>,
    session: Session,
    ApiForm(form): ApiForm<DenyUserForm>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let discord_id = parse_client_id("discordId", &form.discord_id)?;

    let user = UserService::new(&state.db).deny(discord_id).await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}
