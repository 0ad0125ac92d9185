use super::*;

/// Expected: Ok(Some) with the new status and the role untouched
#[tokio::test]
async fn updates_status_keeping_role() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .discord_id("7")
        .status(UserStatus::Pending)
        .role(UserRole::Admin)
        .build()
        .await?;

    let user = UserRepository::new(db)
        .set_access(7, UserStatus::Denied, None)
        .await?
        .unwrap();

    assert_eq!(user.status, UserStatus::Denied);
    assert_eq!(user.role, UserRole::Admin);

    Ok(())
}

/// Expected: Ok(None) for an unknown user
#[tokio::test]
async fn returns_none_for_unknown_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = UserRepository::new(db)
        .set_access(7, UserStatus::Approved, Some(UserRole::Admin))
        .await?;

    assert!(result.is_none());

    Ok(())
}
