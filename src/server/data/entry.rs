//! Entry data repository for database operations.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

use crate::server::{
    error::AppError,
    model::entry::{CreateEntryParam, Entry},
};

const DUPLICATE_ENTRY_MESSAGE: &str = "An entry with that name already exists in this room";

/// Repository providing database operations for room entries.
pub struct EntryRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EntryRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new entry.
    ///
    /// # Returns
    /// - `Ok(Entry)` - The created entry
    /// - `Err(AppError::Conflict)` - An entry with this name already exists in the room
    /// - `Err(AppError::DbErr)` - Any other database error
    pub async fn create(&self, param: CreateEntryParam) -> Result<Entry, AppError> {
        let entity = entity::entry::ActiveModel {
            id: ActiveValue::NotSet,
            room_id: ActiveValue::Set(param.room_id),
            user_id: ActiveValue::Set(param.user_id.to_string()),
            name: ActiveValue::Set(param.name),
            yaml_file_path: ActiveValue::Set(param.yaml_file_path),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, DUPLICATE_ENTRY_MESSAGE))?;

        Entry::from_entity(entity)
    }

    pub async fn find_by_id(&self, entry_id: i32) -> Result<Option<Entry>, AppError> {
        let entity = entity::prelude::Entry::find_by_id(entry_id)
            .one(self.db)
            .await?;

        entity.map(Entry::from_entity).transpose()
    }

    /// Finds the entry of `room_id` with exactly `name`.
    pub async fn find_by_room_and_name(
        &self,
        room_id: i32,
        name: &str,
    ) -> Result<Option<Entry>, AppError> {
        let entity = entity::prelude::Entry::find()
            .filter(entity::entry::Column::RoomId.eq(room_id))
            .filter(entity::entry::Column::Name.eq(name))
            .one(self.db)
            .await?;

        entity.map(Entry::from_entity).transpose()
    }

    /// Gets all entries of a room in upload order.
    pub async fn get_by_room(&self, room_id: i32) -> Result<Vec<Entry>, AppError> {
        let entities = entity::prelude::Entry::find()
            .filter(entity::entry::Column::RoomId.eq(room_id))
            .order_by_asc(entity::entry::Column::CreatedAt)
            .order_by_asc(entity::entry::Column::Id)
            .all(self.db)
            .await?;

        entities.into_iter().map(Entry::from_entity).collect()
    }

    /// Gets the distinct ids of rooms in which `user_id` owns at least one entry.
    pub async fn get_room_ids_for_user(&self, user_id: u64) -> Result<Vec<i32>, AppError> {
        let room_ids = entity::prelude::Entry::find()
            .select_only()
            .column(entity::entry::Column::RoomId)
            .distinct()
            .filter(entity::entry::Column::UserId.eq(user_id.to_string()))
            .into_tuple::<i32>()
            .all(self.db)
            .await?;

        Ok(room_ids)
    }

    /// Renames an entry. Owner and room are left untouched.
    ///
    /// # Returns
    /// - `Ok(Some(Entry))` - The renamed entry
    /// - `Ok(None)` - No entry with that id exists
    /// - `Err(AppError::Conflict)` - The room already has an entry with `name`
    pub async fn rename(&self, entry_id: i32, name: String) -> Result<Option<Entry>, AppError> {
        let Some(entity) = entity::prelude::Entry::find_by_id(entry_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: entity::entry::ActiveModel = entity.into();
        active_model.name = ActiveValue::Set(name);

        let updated = active_model
            .update(self.db)
            .await
            .map_err(|e| AppError::conflict_on_unique(e, DUPLICATE_ENTRY_MESSAGE))?;

        Entry::from_entity(updated).map(Some)
    }

    /// Deletes an entry.
    ///
    /// # Returns
    /// - `Ok(true)` - Entry deleted
    /// - `Ok(false)` - No entry with that id existed
    pub async fn delete(&self, entry_id: i32) -> Result<bool, AppError> {
        let result = entity::prelude::Entry::delete_by_id(entry_id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
