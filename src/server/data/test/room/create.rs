use super::*;

/// Expected: Ok with the room persisted under guild 123
#[tokio::test]
async fn creates_room() -> Result<(), AppError> {
    let test = TestBuilder::new().with_room_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let repo = RoomRepository::new(db);

    let room = repo
        .create(CreateRoomParam {
            guild_id: 123,
            name: "Race Night".to_string(),
        })
        .await?;

    assert_eq!(room.guild_id, 123);
    assert_eq!(room.name, "Race Night");

    let found = repo.find_by_guild_and_name(123, "Race Night").await?;
    assert_eq!(found.map(|r| r.id), Some(room.id));

    Ok(())
}

/// Tests that the unique index on guild and name surfaces as a conflict.
///
/// Expected: Err(AppError::Conflict) for the second insert
#[tokio::test]
async fn maps_duplicate_name_to_conflict() -> Result<(), AppError> {
    let test = TestBuilder::new().with_room_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let repo = RoomRepository::new(db);

    let param = CreateRoomParam {
        guild_id: 123,
        name: "Race Night".to_string(),
    };
    repo.create(param.clone()).await?;
    let result = repo.create(param).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}
