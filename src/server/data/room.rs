//! Room data repository for database operations.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};

use crate::server::{
    error::AppError,
    model::{
        entry::Entry,
        room::{CreateRoomParam, Room},
    },
};

/// Repository providing database operations for rooms.
pub struct RoomRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RoomRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new room.
    ///
    /// # Returns
    /// - `Ok(Room)` - The created room
    /// - `Err(AppError::Conflict)` - A room with this name already exists in the guild
    /// - `Err(AppError::DbErr)` - Any other database error
    pub async fn create(&self, param: CreateRoomParam) -> Result<Room, AppError> {
        let entity = entity::room::ActiveModel {
            id: ActiveValue::NotSet,
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            name: ActiveValue::Set(param.name),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, "A room with that name already exists"))?;

        Room::from_entity(entity)
    }

    pub async fn find_by_id(&self, room_id: i32) -> Result<Option<Room>, AppError> {
        let entity = entity::prelude::Room::find_by_id(room_id)
            .one(self.db)
            .await?;

        entity.map(Room::from_entity).transpose()
    }

    /// Finds the room of `guild_id` with exactly `name`.
    pub async fn find_by_guild_and_name(
        &self,
        guild_id: u64,
        name: &str,
    ) -> Result<Option<Room>, AppError> {
        let entity = entity::prelude::Room::find()
            .filter(entity::room::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::room::Column::Name.eq(name))
            .one(self.db)
            .await?;

        entity.map(Room::from_entity).transpose()
    }

    /// Gets all rooms of a guild in creation order.
    pub async fn get_by_guild(&self, guild_id: u64) -> Result<Vec<Room>, AppError> {
        let entities = entity::prelude::Room::find()
            .filter(entity::room::Column::GuildId.eq(guild_id.to_string()))
            .order_by_asc(entity::room::Column::CreatedAt)
            .order_by_asc(entity::room::Column::Id)
            .all(self.db)
            .await?;

        entities.into_iter().map(Room::from_entity).collect()
    }

    /// Gets the rooms with the given ids in creation order. Unknown ids are ignored.
    pub async fn get_by_ids(&self, room_ids: &[i32]) -> Result<Vec<Room>, AppError> {
        if room_ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = entity::prelude::Room::find()
            .filter(entity::room::Column::Id.is_in(room_ids.iter().copied()))
            .order_by_asc(entity::room::Column::CreatedAt)
            .order_by_asc(entity::room::Column::Id)
            .all(self.db)
            .await?;

        entities.into_iter().map(Room::from_entity).collect()
    }

    /// Deletes a room together with all of its entries in one transaction.
    ///
    /// Uploaded files are not touched, the caller removes them using the returned entries.
    ///
    /// # Returns
    /// - `Ok(Some(entries))` - Room deleted, `entries` are the entries it contained
    /// - `Ok(None)` - No room with that id exists
    /// - `Err(AppError)` - Database error, nothing was deleted
    pub async fn delete_with_entries(&self, room_id: i32) -> Result<Option<Vec<Entry>>, AppError> {
        let txn = self.db.begin().await?;

        if entity::prelude::Room::find_by_id(room_id)
            .one(&txn)
            .await?
            .is_none()
        {
            return Ok(None);
        }

        let entries = entity::prelude::Entry::find()
            .filter(entity::entry::Column::RoomId.eq(room_id))
            .all(&txn)
            .await?;

        entity::prelude::Entry::delete_many()
            .filter(entity::entry::Column::RoomId.eq(room_id))
            .exec(&txn)
            .await?;

        entity::prelude::Room::delete_by_id(room_id)
            .exec(&txn)
            .await?;

        txn.commit().await?;

        let entries = entries
            .into_iter()
            .map(Entry::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(entries))
    }
}
