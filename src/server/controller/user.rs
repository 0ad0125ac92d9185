use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{api::ErrorDto, user::UserStatusDto},
    server::{error::AppError, middleware::auth::AuthGuard, state::AppState},
};

use super::USER_TAG;

/// Registration status and role of the session user.
///
/// Answers `ANONYMOUS` / `NONE` without a session so clients can poll it freely.
#[utoipa::path(
    get,
    path = "/api/user/status",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Status of the session user", body = UserStatusDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_status(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let status = match AuthGuard::new(&state.db, &session).current().await? {
        Some(user) => user.status_dto(),
        None => UserStatusDto::anonymous(),
    };

    Ok((StatusCode::OK, Json(status)))
}
