use super::*;

/// Tests that a user with several entries in one room gets that room once.
///
/// Expected: Ok with each room id listed exactly once
#[tokio::test]
async fn returns_distinct_room_ids() -> Result<(), AppError> {
    let test = TestBuilder::new().with_room_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let room = factory::create_room(db, "123").await?;
    let other_room = factory::create_room(db, "123").await?;
    factory::create_room(db, "123").await?;

    factory::create_entry(db, room.id, "1").await?;
    factory::create_entry(db, room.id, "1").await?;
    factory::create_entry(db, other_room.id, "1").await?;
    factory::create_entry(db, other_room.id, "2").await?;

    let mut room_ids = EntryRepository::new(db).get_room_ids_for_user(1).await?;
    room_ids.sort();

    assert_eq!(room_ids, vec![room.id, other_room.id]);

    Ok(())
}
