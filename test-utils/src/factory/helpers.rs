//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique IDs in tests.
///
/// Starts far above the small ids tests pick by hand so generated ids never collide with them.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1_000_000_000);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a room in `guild_id` with one entry owned by a freshly created user.
///
/// # Returns
/// - `Ok((user, room, entry))` - Tuple of all created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_room_with_entry(
    db: &DatabaseConnection,
    guild_id: &str,
) -> Result<
    (
        entity::user::Model,
        entity::room::Model,
        entity::entry::Model,
    ),
    DbErr,
> {
    let user = crate::factory::user::create_user(db).await?;
    let room = crate::factory::room::create_room(db, guild_id).await?;
    let entry = crate::factory::entry::create_entry(db, room.id, &user.discord_id).await?;

    Ok((user, room, entry))
}
