use super::*;

/// Expected: Ok with only the rooms of the requested guild
#[tokio::test]
async fn returns_rooms_of_guild_only() -> Result<(), AppError> {
    let test = TestBuilder::new().with_room_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::create_room(db, "123").await?;
    let second = factory::create_room(db, "123").await?;
    factory::create_room(db, "456").await?;

    let rooms = RoomRepository::new(db).get_by_guild(123).await?;
    let ids: Vec<i32> = rooms.iter().map(|room| room.id).collect();

    assert_eq!(ids, vec![first.id, second.id]);

    Ok(())
}

/// Expected: Ok with an empty list when no ids are requested
#[tokio::test]
async fn get_by_ids_handles_empty_input() -> Result<(), AppError> {
    let test = TestBuilder::new().with_room_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_room(db, "123").await?;

    let rooms = RoomRepository::new(db).get_by_ids(&[]).await?;

    assert!(rooms.is_empty());

    Ok(())
}
