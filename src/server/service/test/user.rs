use entity::user::{UserRole, UserStatus};
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    error::AppError,
    service::user::{LoginKind, UserService},
};

/// Tests the first-admin bootstrap.
///
/// Expected: first login becomes approved admin, the second stays pending
#[tokio::test]
async fn first_login_bootstraps_admin() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let service = UserService::new(db);

    let first = service
        .login(10, "first".to_string(), &[], LoginKind::Discord)
        .await?;
    let second = service
        .login(11, "second".to_string(), &[], LoginKind::Discord)
        .await?;

    assert_eq!(first.status, UserStatus::Approved);
    assert_eq!(first.role, UserRole::Admin);
    assert_eq!(second.status, UserStatus::Pending);
    assert_eq!(second.role, UserRole::User);

    Ok(())
}

/// Expected: configured admin ids become approved admins even when an admin exists
#[tokio::test]
async fn configured_admin_ids_become_admins() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    factory::user::UserFactory::new(db)
        .role(UserRole::Admin)
        .build()
        .await?;

    let user = UserService::new(db)
        .login(20, "listed".to_string(), &[20], LoginKind::Discord)
        .await?;

    assert_eq!(user.status, UserStatus::Approved);
    assert!(user.is_admin());

    Ok(())
}

/// Expected: repeated Discord logins keep a denial, dev logins approve
#[tokio::test]
async fn login_kind_controls_approval() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    factory::user::UserFactory::new(db)
        .role(UserRole::Admin)
        .build()
        .await?;
    factory::user::UserFactory::new(db)
        .discord_id("30")
        .status(UserStatus::Denied)
        .build()
        .await?;
    let service = UserService::new(db);

    let via_discord = service
        .login(30, "renamed".to_string(), &[], LoginKind::Discord)
        .await?;
    assert_eq!(via_discord.status, UserStatus::Denied);
    assert_eq!(via_discord.username, "renamed");

    let via_dev = service
        .login(31, "dev".to_string(), &[], LoginKind::Dev)
        .await?;
    assert_eq!(via_dev.status, UserStatus::Approved);
    assert_eq!(via_dev.role, UserRole::User);

    Ok(())
}

/// Expected: approve and deny update pending users and report unknown ids
#[tokio::test]
async fn approves_and_denies_requests() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    for id in ["40", "41"] {
        factory::user::UserFactory::new(db)
            .discord_id(id)
            .status(UserStatus::Pending)
            .build()
            .await?;
    }
    let service = UserService::new(db);

    assert_eq!(service.get_pending_requests().await?.len(), 2);

    let approved = service.approve(40, UserRole::Admin).await?;
    let denied = service.deny(41).await?;

    assert_eq!(approved.status, UserStatus::Approved);
    assert!(approved.is_admin());
    assert_eq!(denied.status, UserStatus::Denied);
    assert!(service.get_pending_requests().await?.is_empty());
    assert!(matches!(service.deny(99).await, Err(AppError::NotFound(_))));

    Ok(())
}
