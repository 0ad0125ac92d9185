use super::*;

/// Expected: Ok(false) for an empty table and for a table without admins
#[tokio::test]
async fn returns_false_without_admins() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let repo = UserRepository::new(db);

    assert!(!repo.admin_exists().await?);

    factory::create_user(db).await?;

    assert!(!repo.admin_exists().await?);

    Ok(())
}

/// Expected: Ok(true) once an admin exists
#[tokio::test]
async fn returns_true_with_admin() -> Result<(), AppError> {
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

    assert!(UserRepository::new(db).admin_exists().await?);

    Ok(())
}
