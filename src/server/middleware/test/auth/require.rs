use super::*;

/// Tests admin user passes the admin permission check.
///
/// Expected: Ok(User) with the admin role
#[tokio::test]
async fn grants_access_to_admin_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    factory::user::UserFactory::new(db)
        .discord_id("123456789")
        .username("AdminUser")
        .role(UserRole::Admin)
        .build()
        .await?;

    AuthSession::new(session)
        .set_user(123456789, AuthSource::Discord)
        .await?;

    let user = AuthGuard::new(db, session)
        .require(&[Permission::Admin])
        .await?;

    assert_eq!(user.discord_id, 123456789);
    assert_eq!(user.username, "AdminUser");
    assert!(user.is_admin());

    Ok(())
}

/// Tests approved non-admin user is denied the admin permission.
///
/// Expected: Err(AuthError::AccessDenied)
#[tokio::test]
async fn denies_admin_permission_to_regular_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    factory::user::UserFactory::new(db)
        .discord_id("987654321")
        .build()
        .await?;

    AuthSession::new(session)
        .set_user(987654321, AuthSource::Discord)
        .await?;

    let result = AuthGuard::new(db, session)
        .require(&[Permission::Admin])
        .await;

    match result {
        Err(AppError::AuthErr(AuthError::AccessDenied(user_id, message))) => {
            assert_eq!(user_id, 987654321);
            assert!(message.contains("admin"));
        }
        other => panic!("Expected AccessDenied error, got: {:?}", other),
    }

    Ok(())
}

/// Tests empty permission list grants access to any approved user.
///
/// Expected: Ok(User)
#[tokio::test]
async fn empty_permission_list_grants_access() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    factory::user::UserFactory::new(db)
        .discord_id("555")
        .build()
        .await?;

    AuthSession::new(session)
        .set_user(555, AuthSource::Dev)
        .await?;

    let user = AuthGuard::new(db, session).require(&[]).await?;
    assert_eq!(user.discord_id, 555);

    Ok(())
}

/// Tests request without a session user.
///
/// Expected: Err(AuthError::UserNotInSession)
#[tokio::test]
async fn rejects_missing_session_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let result = AuthGuard::new(db, session).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotInSession))
    ));

    Ok(())
}

/// Tests session user without a database record.
///
/// Expected: Err(AuthError::UserNotInDatabase)
#[tokio::test]
async fn rejects_unknown_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    AuthSession::new(session)
        .set_user(42, AuthSource::Discord)
        .await?;

    let result = AuthGuard::new(db, session).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotInDatabase(42)))
    ));

    Ok(())
}

/// Tests users who are not approved yet or were denied.
///
/// Expected: AccountPending and AccountDenied even for admins
#[tokio::test]
async fn rejects_unapproved_users() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    factory::user::UserFactory::new(db)
        .discord_id("7")
        .status(UserStatus::Pending)
        .build()
        .await?;
    factory::user::UserFactory::new(db)
        .discord_id("8")
        .status(UserStatus::Denied)
        .role(UserRole::Admin)
        .build()
        .await?;

    let auth_session = AuthSession::new(session);
    let guard = AuthGuard::new(db, session);

    auth_session.set_user(7, AuthSource::Discord).await?;
    assert!(matches!(
        guard.require(&[]).await,
        Err(AppError::AuthErr(AuthError::AccountPending(7)))
    ));

    auth_session.set_user(8, AuthSource::Discord).await?;
    assert!(matches!(
        guard.require(&[Permission::Admin]).await,
        Err(AppError::AuthErr(AuthError::AccountDenied(8)))
    ));

    // Status endpoints still see the pending user
    auth_session.set_user(7, AuthSource::Discord).await?;
    let current = guard.current().await?.unwrap();
    assert_eq!(current.status, UserStatus::Pending);

    Ok(())
}
