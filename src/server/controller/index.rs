use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{api::ErrorDto, room::DashboardDto},
    server::{
        error::AppError,
        middleware::{auth::AuthGuard, session::AuthSession},
        service::room::RoomService,
        state::AppState,
    },
};

use super::ROOM_TAG;

/// Landing page data.
///
/// Anonymous visitors get `{"authenticated": false}`, logged in users the same dashboard as
/// `GET /rooms`.
#[utoipa::path(
    get,
    path = "/",
    tag = ROOM_TAG,
    responses(
        (status = 200, description = "Dashboard or anonymous marker", body = DashboardDto),
        (status = 403, description = "Account is pending or denied", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    if !AuthSession::new(&session).is_authenticated().await? {
        return Ok((StatusCode::OK, Json(DashboardDto::anonymous())));
    }

    dashboard_response(&state, &session).await
}

/// Rooms the user is in, guilds they administer and rooms they can join.
#[utoipa::path(
    get,
    path = "/rooms",
    tag = ROOM_TAG,
    responses(
        (status = 200, description = "Dashboard of the logged in user", body = DashboardDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Account is pending or denied", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn dashboard(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    dashboard_response(&state, &session).await
}

async fn dashboard_response(
    state: &AppState,
    session: &Session,
) -> Result<(StatusCode, Json<DashboardDto>), AppError> {
    let user = AuthGuard::new(&state.db, session).require(&[]).await?;

    let dashboard = RoomService::new(&state.db, &state.discord, &state.uploads)
        .dashboard(user.discord_id)
        .await?;

    Ok((StatusCode::OK, Json(dashboard.into_dto())))
}
