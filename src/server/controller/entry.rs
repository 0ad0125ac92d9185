use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        room::{EntryDto, RenameEntryForm, UploadEntryForm},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        service::room::{RoomService, UploadedFile},
        state::AppState,
    },
};

use super::{attachment_disposition, ApiForm, ENTRY_TAG};

const YAML_CONTENT_TYPE: &str = "application/x-yaml";

/// Upload a YAML file as a new entry of a room.
///
/// Expects a multipart body with an `entryName` text field and a `yamlFile` file field.
///
/// # Access Control
/// Caller must be a member of the room's guild.
#[utoipa::path(
    post,
    path = "/rooms/{room_id}/entries",
    tag = ENTRY_TAG,
    params(
        ("room_id" = i32, Path, description = "Room ID")
    ),
    request_body(content = UploadEntryForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Successfully created entry", body = EntryDto),
        (status = 400, description = "Missing field, blank name or invalid file", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not a member of the guild", body = ErrorDto),
        (status = 404, description = "Room not found", body = ErrorDto),
        (status = 409, description = "Entry name already taken", body = ErrorDto),
        (status = 413, description = "Upload exceeds the body limit", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn upload_entry(
    State(state): State<AppState>,
    session: Session,
    Path(room_id): Path<i32>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let mut entry_name = None;
    let mut yaml_file = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("entryName") => {
                entry_name = Some(field.text().await?);
            }
            Some("yamlFile") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                yaml_file = Some(UploadedFile {
                    filename,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {}
        }
    }

    let entry_name =
        entry_name.ok_or_else(|| AppError::BadRequest("Missing entryName field".to_string()))?;
    let yaml_file =
        yaml_file.ok_or_else(|| AppError::BadRequest("Missing yamlFile field".to_string()))?;

    let entry = RoomService::new(&state.db, &state.discord, &state.uploads)
        .add_entry(room_id, user.discord_id, &entry_name, yaml_file)
        .await?;

    Ok((StatusCode::CREATED, Json(entry.into_dto())))
}

/// Rename an entry. Only the entry's owner may rename it.
#[utoipa::path(
    post,
    path = "/rooms/{room_id}/entries/{entry_id}/rename",
    tag = ENTRY_TAG,
    params(
        ("room_id" = i32, Path, description = "Room ID"),
        ("entry_id" = i32, Path, description = "Entry ID")
    ),
    request_body(content = RenameEntryForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Renamed entry", body = EntryDto),
        (status = 400, description = "Blank name", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User does not own the entry", body = ErrorDto),
        (status = 404, description = "Entry not found in room", body = ErrorDto),
        (status = 409, description = "Entry name already taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn rename_entry(
    State(state): State<AppState>,
    session: Session,
    Path((room_id, entry_id)): Path<(i32, i32)>,
    ApiForm(form): ApiForm<RenameEntryForm>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let entry = RoomService::new(&state.db, &state.discord, &state.uploads)
        .rename_entry(room_id, entry_id, user.discord_id, &form.new_name)
        .await?;

    Ok((StatusCode::OK, Json(entry.into_dto())))
}

/// Delete an entry and its file. Allowed for the owner and for admins of the guild.
#[utoipa::path(
    post,
    path = "/rooms/{room_id}/entries/{entry_id}/delete",
    tag = ENTRY_TAG,
    params(
        ("room_id" = i32, Path, description = "Room ID"),
        ("entry_id" = i32, Path, description = "Entry ID")
    ),
    responses(
        (status = 204, description = "Entry deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User neither owns the entry nor administers the guild", body = ErrorDto),
        (status = 404, description = "Entry not found in room", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_entry(
    State(state): State<AppState>,
    session: Session,
    Path((room_id, entry_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    RoomService::new(&state.db, &state.discord, &state.uploads)
        .delete_entry(room_id, entry_id, user.discord_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Download the YAML file of an entry as `<entry name>.yaml`.
#[utoipa::path(
    get,
    path = "/rooms/{room_id}/entries/{entry_id}/download",
    tag = ENTRY_TAG,
    params(
        ("room_id" = i32, Path, description = "Room ID"),
        ("entry_id" = i32, Path, description = "Entry ID")
    ),
    responses(
        (status = 200, description = "YAML file attachment", content_type = "application/x-yaml", body = Vec<u8>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is neither member nor admin of the guild", body = ErrorDto),
        (status = 404, description = "Entry or file not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn download_entry(
    State(state): State<AppState>,
    session: Session,
    Path((room_id, entry_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let download = RoomService::new(&state.db, &state.discord, &state.uploads)
        .download_entry(room_id, entry_id, user.discord_id)
        .await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, YAML_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, attachment_disposition(&download.filename)),
        ],
        download.bytes,
    ))
}
