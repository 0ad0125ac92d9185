//! Room, entry and dashboard DTOs.
//!
//! Discord snowflakes are serialized as strings since they exceed the safe integer range of
//! JavaScript clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct RoomDto {
    pub id: i32,
    pub guild_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct EntryDto {
    pub id: i32,
    pub room_id: i32,
    pub user_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct GuildDto {
    pub id: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct UserInfoDto {
    pub id: String,
    pub username: String,
}

/// An entry as listed on the room page.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct EntryViewDto {
    pub id: i32,
    pub name: String,
    pub owner: UserInfoDto,
    /// Whether the requesting user owns this entry.
    pub is_owner: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct RoomViewDto {
    pub room: RoomDto,
    pub guild: GuildDto,
    pub entries: Vec<EntryViewDto>,
    /// Whether the requesting user administers the room's guild.
    pub is_admin: bool,
    /// Whether the requesting user has at least one entry in the room.
    pub is_member: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct DashboardDto {
    pub authenticated: bool,
    pub user_rooms: Vec<RoomDto>,
    pub admin_guilds: Vec<GuildDto>,
    pub joinable_rooms: Vec<RoomDto>,
}

impl DashboardDto {
    /// Dashboard answered to requests without a logged in user.
    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            user_rooms: Vec::new(),
            admin_guilds: Vec::new(),
            joinable_rooms: Vec::new(),
        }
    }
}

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomForm {
    pub guild_id: String,
    pub name: String,
}

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenameEntryForm {
    pub new_name: String,
}

/// Multipart body of the entry upload, documented for the OpenAPI schema only.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct UploadEntryForm {
    pub entry_name: String,
    #[schema(value_type = String, format = Binary)]
    pub yaml_file: Vec<u8>,
}
