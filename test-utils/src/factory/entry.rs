//! Entry factory for creating test entry entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test entries with customizable fields.
///
/// The default file path points at a file that does not exist, which is fine for tests
/// that only touch metadata.
pub struct EntryFactory<'a> {
    db: &'a DatabaseConnection,
    room_id: i32,
    user_id: String,
    name: String,
    yaml_file_path: String,
}

impl<'a> EntryFactory<'a> {
    /// Creates a new EntryFactory owned by `user_id` in room `room_id`.
    pub fn new(db: &'a DatabaseConnection, room_id: i32, user_id: impl Into<String>) -> Self {
        let id = next_id();
        Self {
            db,
            room_id,
            user_id: user_id.into(),
            name: format!("Entry {}", id),
            yaml_file_path: format!("uploads/{}_entry.yaml", id),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn yaml_file_path(mut self, path: impl Into<String>) -> Self {
        self.yaml_file_path = path.into();
        self
    }

    /// Builds and inserts the entry entity into the database.
    pub async fn build(self) -> Result<entity::entry::Model, DbErr> {
        entity::entry::ActiveModel {
            id: ActiveValue::NotSet,
            room_id: ActiveValue::Set(self.room_id),
            user_id: ActiveValue::Set(self.user_id),
            name: ActiveValue::Set(self.name),
            yaml_file_path: ActiveValue::Set(self.yaml_file_path),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an entry with default values.
pub async fn create_entry(
    db: &DatabaseConnection,
    room_id: i32,
    user_id: impl Into<String>,
) -> Result<entity::entry::Model, DbErr> {
    EntryFactory::new(db, room_id, user_id).build().await
}
