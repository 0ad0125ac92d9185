use chrono::{DateTime, Utc};

use crate::{
    model::room::EntryDto,
    server::{error::AppError, util::parse::parse_u64_from_string},
};

/// One member's uploaded configuration within a room.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub id: i32,
    pub room_id: i32,
    /// Owner of the entry. Never changes after creation.
    pub user_id: u64,
    /// Unique within the room.
    pub name: String,
    /// Upload storage key of the YAML file.
    pub yaml_file_path: String,
    pub created_at: DateTime<Utc>,
}

impl Entry {
    pub fn into_dto(self) -> EntryDto {
        EntryDto {
            id: self.id,
            room_id: self.room_id,
            user_id: self.user_id.to_string(),
            name: self.name,
            created_at: self.created_at,
        }
    }

    /// Converts an entity model to an entry domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Entry)` - The converted entry
    /// - `Err(AppError::InternalErr(ParseStringId))` - Stored user id is not numeric
    pub fn from_entity(entity: entity::entry::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            room_id: entity.room_id,
            user_id: parse_u64_from_string(entity.user_id)?,
            name: entity.name,
            yaml_file_path: entity.yaml_file_path,
            created_at: entity.created_at,
        })
    }
}

/// Parameters for inserting an entry after its file has been stored.
#[derive(Debug, Clone)]
pub struct CreateEntryParam {
    pub room_id: i32,
    pub user_id: u64,
    pub name: String,
    pub yaml_file_path: String,
}
