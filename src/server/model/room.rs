use chrono::{DateTime, Utc};

use crate::{
    model::room::{DashboardDto, EntryViewDto, RoomDto, RoomViewDto},
    server::{
        error::AppError,
        model::entry::Entry,
        service::discord::{GuildInfo, UserInfo},
        util::parse::parse_u64_from_string,
    },
};

/// A lobby scoped to one Discord guild.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: i32,
    /// Discord guild the room belongs to. Never changes after creation.
    pub guild_id: u64,
    /// Unique within the guild.
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Room {
    pub fn into_dto(self) -> RoomDto {
        RoomDto {
            id: self.id,
            guild_id: self.guild_id.to_string(),
            name: self.name,
            created_at: self.created_at,
        }
    }

    /// Converts an entity model to a room domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Room)` - The converted room
    /// - `Err(AppError::InternalErr(ParseStringId))` - Stored guild id is not numeric
    pub fn from_entity(entity: entity::room::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            guild_id: parse_u64_from_string(entity.guild_id)?,
            name: entity.name,
            created_at: entity.created_at,
        })
    }
}

/// Parameters for inserting a room. The name is expected to be trimmed already.
#[derive(Debug, Clone)]
pub struct CreateRoomParam {
    pub guild_id: u64,
    pub name: String,
}

/// Room page as seen by one user.
#[derive(Debug, Clone)]
pub struct RoomView {
    pub room: Room,
    pub guild: GuildInfo,
    pub entries: Vec<EntryView>,
    pub is_admin: bool,
    /// The user has at least one entry in the room.
    pub is_member: bool,
}

#[derive(Debug, Clone)]
pub struct EntryView {
    pub entry: Entry,
    pub owner: UserInfo,
    pub is_owner: bool,
}

impl RoomView {
    pub fn into_dto(self) -> RoomViewDto {
        RoomViewDto {
            room: self.room.into_dto(),
            guild: self.guild.into_dto(),
            entries: self
                .entries
                .into_iter()
                .map(|view| EntryViewDto {
                    id: view.entry.id,
                    name: view.entry.name,
                    owner: view.owner.into_dto(),
                    is_owner: view.is_owner,
                    created_at: view.entry.created_at,
                })
                .collect(),
            is_admin: self.is_admin,
            is_member: self.is_member,
        }
    }
}

/// Rooms and guilds listed on the landing page.
#[derive(Debug, Clone)]
pub struct Dashboard {
    /// Rooms in which the user has an entry.
    pub user_rooms: Vec<Room>,
    /// Guilds in which the user may create rooms.
    pub admin_guilds: Vec<GuildInfo>,
    /// Rooms of the user's guilds without an entry of the user.
    pub joinable_rooms: Vec<Room>,
}

impl Dashboard {
    pub fn into_dto(self) -> DashboardDto {
        DashboardDto {
            authenticated: true,
            user_rooms: self.user_rooms.into_iter().map(Room::into_dto).collect(),
            admin_guilds: self
                .admin_guilds
                .into_iter()
                .map(GuildInfo::into_dto)
                .collect(),
            joinable_rooms: self.joinable_rooms.into_iter().map(Room::into_dto).collect(),
        }
    }
}
