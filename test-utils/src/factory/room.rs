//! Room factory for creating test room entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test rooms with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::room::RoomFactory;
///
/// let room = RoomFactory::new(&db, "123")
///     .name("Weekly Async")
///     .build()
///     .await?;
/// ```
pub struct RoomFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    name: String,
}

impl<'a> RoomFactory<'a> {
    /// Creates a new RoomFactory for `guild_id` named `"Room {id}"`.
    pub fn new(db: &'a DatabaseConnection, guild_id: impl Into<String>) -> Self {
        let id = next_id();
        Self {
            db,
            guild_id: guild_id.into(),
            name: format!("Room {}", id),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Builds and inserts the room entity into the database.
    pub async fn build(self) -> Result<entity::room::Model, DbErr> {
        entity::room::ActiveModel {
            id: ActiveValue::NotSet,
            guild_id: ActiveValue::Set(self.guild_id),
            name: ActiveValue::Set(self.name),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a room with a default name in the provided guild.
pub async fn create_room(
    db: &DatabaseConnection,
    guild_id: impl Into<String>,
) -> Result<entity::room::Model, DbErr> {
    RoomFactory::new(db, guild_id).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;

    #[tokio::test]
    async fn creates_rooms_with_unique_default_names() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_room_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let first = create_room(db, "123").await?;
        let second = create_room(db, "123").await?;

        assert_eq!(first.guild_id, "123");
        assert_ne!(first.id, second.id);
        assert_ne!(first.name, second.name);

        Ok(())
    }

    #[tokio::test]
    async fn rejects_duplicate_name_in_same_guild() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_room_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        RoomFactory::new(db, "123").name("Lobby").build().await?;
        let duplicate = RoomFactory::new(db, "123").name("Lobby").build().await;
        let other_guild = RoomFactory::new(db, "456").name("Lobby").build().await;

        assert!(duplicate.is_err());
        assert!(other_guild.is_ok());

        Ok(())
    }
}
