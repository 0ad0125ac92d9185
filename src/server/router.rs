use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tower_sessions::SessionManagerLayer;
use tower_sessions_sqlx_store::SqliteStore;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    model::{api, room, user},
    server::{
        controller::{self, admin, auth, entry, index},
        state::AppState,
    },
};

/// Largest accepted request body, sized for YAML uploads.
const MAX_BODY_BYTES: usize = 4 * 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(
        index::index,
        index::dashboard,
        controller::room::create_room,
        controller::room::get_room,
        controller::room::download_all,
        controller::room::delete_room,
        entry::upload_entry,
        entry::rename_entry,
        entry::delete_entry,
        entry::download_entry,
        auth::login,
        auth::callback,
        auth::dev_login,
        auth::logout,
        auth::get_user,
        controller::user::get_status,
        admin::get_requests,
        admin::approve,
        admin::deny,
    ),
    components(schemas(
        api::ErrorDto,
        room::RoomDto,
        room::EntryDto,
        room::GuildDto,
        room::UserInfoDto,
        room::EntryViewDto,
        room::RoomViewDto,
        room::DashboardDto,
        room::CreateRoomForm,
        room::RenameEntryForm,
        room::UploadEntryForm,
        user::StatusDto,
        user::RoleDto,
        user::UserDto,
        user::LoginSourceDto,
        user::UserStatusDto,
        user::ApproveUserForm,
        user::DenyUserForm,
        user::DevLoginForm,
    ))
)]
pub struct ApiDoc;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index::index))
        .route(
            "/rooms",
            get(index::dashboard).post(controller::room::create_room),
        )
        .route("/rooms/{room_id}", get(controller::room::get_room))
        .route(
            "/rooms/{room_id}/download-all",
            get(controller::room::download_all),
        )
        .route("/rooms/{room_id}/delete", post(controller::room::delete_room))
        .route("/rooms/{room_id}/entries", post(entry::upload_entry))
        .route(
            "/rooms/{room_id}/entries/{entry_id}/rename",
            post(entry::rename_entry),
        )
        .route(
            "/rooms/{room_id}/entries/{entry_id}/delete",
            post(entry::delete_entry),
        )
        .route(
            "/rooms/{room_id}/entries/{entry_id}/download",
            get(entry::download_entry),
        )
        .route("/api/auth/login", get(auth::login))
        .route("/api/auth/callback", get(auth::callback))
        .route("/api/auth/logout", get(auth::logout))
        .route("/api/auth/user", get(auth::get_user))
        .route("/api/auth/dev-login", post(auth::dev_login))
        .route("/api/user/status", get(controller::user::get_status))
        .route("/api/admin/requests", get(admin::get_requests))
        .route("/api/admin/approve", post(admin::approve))
        .route("/api/admin/deny", post(admin::deny))
}

/// Assembles the full application: routes, API docs and the middleware stack.
///
/// Requests running longer than `request_timeout` are answered with `503 Service Unavailable`.
pub fn build_app(
    state: AppState,
    session_layer: SessionManagerLayer<SqliteStore>,
    request_timeout: Duration,
) -> Router {
    router()
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", ApiDoc::openapi()))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(session_layer)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::SERVICE_UNAVAILABLE,
            request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
