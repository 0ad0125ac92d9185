use super::*;
use crate::server::data::entry::EntryRepository;

/// Tests that deleting a room removes its entries in the same operation.
///
/// Expected: Ok(Some) containing the deleted entry, no room or entry left behind
#[tokio::test]
async fn deletes_room_and_entries() -> Result<(), AppError> {
    let test = TestBuilder::new().with_room_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, room, entry) = factory::helpers::create_room_with_entry(db, "123").await?;
    let other_room = factory::create_room(db, "123").await?;
    let other_entry = factory::create_entry(db, other_room.id, "99").await?;

    let deleted = RoomRepository::new(db)
        .delete_with_entries(room.id)
        .await?
        .unwrap();

    assert_eq!(deleted.len(), 1);
    assert_eq!(deleted[0].id, entry.id);
    assert!(RoomRepository::new(db).find_by_id(room.id).await?.is_none());

    let entry_repo = EntryRepository::new(db);
    assert!(entry_repo.find_by_id(entry.id).await?.is_none());
    assert!(entry_repo.find_by_id(other_entry.id).await?.is_some());

    Ok(())
}

/// Expected: Ok(None) for an unknown room
#[tokio::test]
async fn returns_none_for_unknown_room() -> Result<(), AppError> {
    let test = TestBuilder::new().with_room_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = RoomRepository::new(db).delete_with_entries(404).await?;

    assert!(result.is_none());

    Ok(())
}
