use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        room::{CreateRoomForm, RoomDto, RoomViewDto},
    },
    server::{
        error::AppError, middleware::auth::AuthGuard, service::room::RoomService,
        state::AppState,
    },
};

use super::{attachment_disposition, parse_client_id, ApiForm, ROOM_TAG};

const ZIP_CONTENT_TYPE: &str = "application/zip";

/// Create a room in a guild.
///
/// # Access Control
/// Caller must be an admin of the guild according to Discord.
///
/// # Returns
/// - `201 Created` - The new room
/// - `400 Bad Request` - Malformed guild id or blank name
/// - `403 Forbidden` - Caller is not an admin of the guild
/// - `409 Conflict` - Guild already has a room with that name
#[utoipa::path(
    post,
    path = "/rooms",
    tag = ROOM_TAG,
    request_body(content = CreateRoomForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Successfully created room", body = RoomDto),
        (status = 400, description = "Invalid room data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin of the guild", body = ErrorDto),
        (status = 409, description = "Room name already taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_room(
    State(state): State<AppState>,
    session: Session,
    ApiForm(form): ApiForm<CreateRoomForm>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let guild_id = parse_client_id("guildId", &form.guild_id)?;

    let room = RoomService::new(&state.db, &state.discord, &state.uploads)
        .create_room(guild_id, &form.name, user.discord_id)
        .await?;

    Ok((StatusCode::CREATED, Json(room.into_dto())))
}

/// Room page with its entries and the caller's standing.
#[utoipa::path(
    get,
    path = "/rooms/{room_id}",
    tag = ROOM_TAG,
    params(
        ("room_id" = i32, Path, description = "Room ID")
    ),
    responses(
        (status = 200, description = "Room view", body = RoomViewDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is neither member nor admin of the guild", body = ErrorDto),
        (status = 404, description = "Room not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_room(
    State(state): State<AppState>,
    session: Session,
    Path(room_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let view = RoomService::new(&state.db, &state.discord, &state.uploads)
        .get_room_view(room_id, user.discord_id)
        .await?;

    Ok((StatusCode::OK, Json(view.into_dto())))
}

/// Download the YAML files of all entries as `<room name>_yamls.zip`.
///
/// Entries whose file is missing from storage are left out.
#[utoipa::path(
    get,
    path = "/rooms/{room_id}/download-all",
    tag = ROOM_TAG,
    params(
        ("room_id" = i32, Path, description = "Room ID")
    ),
    responses(
        (status = 200, description = "Zip archive attachment", content_type = "application/zip", body = Vec<u8>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is neither member nor admin of the guild", body = ErrorDto),
        (status = 404, description = "Room not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn download_all(
    State(state): State<AppState>,
    session: Session,
    Path(room_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let archive = RoomService::new(&state.db, &state.discord, &state.uploads)
        .download_all(room_id, user.discord_id)
        .await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, ZIP_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, attachment_disposition(&archive.filename)),
        ],
        archive.bytes,
    ))
}

/// Delete a room with all of its entries and uploaded files.
///
/// # Access Control
/// Caller must be an admin of the room's guild.
#[utoipa::path(
    post,
    path = "/rooms/{room_id}/delete",
    tag = ROOM_TAG,
    params(
        ("room_id" = i32, Path, description = "Room ID")
    ),
    responses(
        (status = 204, description = "Room deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin of the guild", body = ErrorDto),
        (status = 404, description = "Room not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_room(
    State(state): State<AppState>,
    session: Session,
    Path(room_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    RoomService::new(&state.db, &state.discord, &state.uploads)
        .delete_room(room_id, user.discord_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
