use super::*;

/// Tests filtering users by registration status.
///
/// Expected: Ok with only the pending users
#[tokio::test]
async fn returns_only_matching_status() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let pending = factory::user::UserFactory::new(db)
        .status(UserStatus::Pending)
        .build()
        .await?;
    factory::create_user(db).await?;
    factory::user::UserFactory::new(db)
        .status(UserStatus::Denied)
        .build()
        .await?;

    let users = UserRepository::new(db)
        .get_by_status(UserStatus::Pending)
        .await?;

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].discord_id.to_string(), pending.discord_id);

    Ok(())
}
