use super::*;

fn param(room_id: i32, user_id: u64, name: &str) -> CreateEntryParam {
    CreateEntryParam {
        room_id,
        user_id,
        name: name.to_string(),
        yaml_file_path: format!("{}.yaml", name),
    }
}

/// Expected: Ok with the entry persisted for the owner
#[tokio::test]
async fn creates_entry() -> Result<(), AppError> {
    let test = TestBuilder::new().with_room_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let room = factory::create_room(db, "123").await?;

    let entry = EntryRepository::new(db)
        .create(param(room.id, 1, "P1"))
        .await?;

    assert_eq!(entry.room_id, room.id);
    assert_eq!(entry.user_id, 1);
    assert_eq!(entry.name, "P1");
    assert_eq!(entry.yaml_file_path, "P1.yaml");

    Ok(())
}

/// Tests that two entries with the same name in one room cannot both exist.
///
/// Expected: exactly one Ok and one Err(AppError::Conflict)
#[tokio::test]
async fn maps_duplicate_name_to_conflict() -> Result<(), AppError> {
    let test = TestBuilder::new().with_room_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let room = factory::create_room(db, "123").await?;
    let other_room = factory::create_room(db, "123").await?;
    let repo = EntryRepository::new(db);

    let first = repo.create(param(room.id, 1, "P1")).await;
    let second = repo.create(param(room.id, 2, "P1")).await;
    let elsewhere = repo.create(param(other_room.id, 2, "P1")).await;

    assert!(first.is_ok());
    assert!(matches!(second, Err(AppError::Conflict(_))));
    assert!(elsewhere.is_ok());

    Ok(())
}
