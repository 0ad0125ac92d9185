use super::*;

/// Expected: Ok(Some) with the new name and the original owner
#[tokio::test]
async fn renames_entry() -> Result<(), AppError> {
    let test = TestBuilder::new().with_room_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (user, _, entry) = factory::helpers::create_room_with_entry(db, "123").await?;

    let renamed = EntryRepository::new(db)
        .rename(entry.id, "Renamed".to_string())
        .await?
        .unwrap();

    assert_eq!(renamed.name, "Renamed");
    assert_eq!(renamed.user_id.to_string(), user.discord_id);

    Ok(())
}

/// Expected: Err(AppError::Conflict) when the name is taken in the same room
#[tokio::test]
async fn rejects_taken_name() -> Result<(), AppError> {
    let test = TestBuilder::new().with_room_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let room = factory::create_room(db, "123").await?;
    factory::entry::EntryFactory::new(db, room.id, "1")
        .name("Taken")
        .build()
        .await?;
    let entry = factory::create_entry(db, room.id, "2").await?;

    let result = EntryRepository::new(db)
        .rename(entry.id, "Taken".to_string())
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}
