use super::*;

/// Tests creating a new user without explicit access.
///
/// Expected: Ok with user created as pending with the user role
#[tokio::test]
async fn creates_new_user_as_pending() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = UserRepository::new(db)
        .upsert(UpsertUserParam {
            discord_id: 123456789,
            username: "TestUser".to_string(),
            status: None,
            role: None,
        })
        .await?;

    assert_eq!(user.discord_id, 123456789);
    assert_eq!(user.username, "TestUser");
    assert_eq!(user.status, UserStatus::Pending);
    assert_eq!(user.role, UserRole::User);

    Ok(())
}

/// Tests that a plain login refreshes the username but keeps the stored access.
///
/// Expected: Ok with new username, status and role preserved
#[tokio::test]
async fn updates_username_preserving_access() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .discord_id("42")
        .username("OldName")
        .role(UserRole::Admin)
        .build()
        .await?;

    let user = UserRepository::new(db)
        .upsert(UpsertUserParam {
            discord_id: 42,
            username: "NewName".to_string(),
            status: None,
            role: None,
        })
        .await?;

    assert_eq!(user.username, "NewName");
    assert_eq!(user.status, UserStatus::Approved);
    assert_eq!(user.role, UserRole::Admin);

    Ok(())
}

/// Tests that explicit access overwrites the stored values of an existing user.
///
/// Expected: Ok with pending user promoted to approved admin
#[tokio::test]
async fn overwrites_access_when_provided() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .discord_id("42")
        .status(UserStatus::Pending)
        .build()
        .await?;

    let user = UserRepository::new(db)
        .upsert(UpsertUserParam {
            discord_id: 42,
            username: "Promoted".to_string(),
            status: Some(UserStatus::Approved),
            role: Some(UserRole::Admin),
        })
        .await?;

    assert_eq!(user.status, UserStatus::Approved);
    assert!(user.is_admin());

    Ok(())
}
