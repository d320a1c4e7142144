use super::*;

/// Tests disabling an account and counting by state.
///
/// Expected: Ok(Some) with is_active false and updated counts
#[tokio::test]
async fn disables_account() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_learner(db).await?;
    factory::create_learner(db).await?;

    let repo = UserRepository::new(db);
    let updated = repo.set_active(user.id, false).await?.unwrap();

    assert!(!updated.is_active);
    assert_eq!(repo.count_by_active(true).await?, 1);
    assert_eq!(repo.count_by_active(false).await?, 1);

    Ok(())
}

/// Tests updating a user that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);

    assert!(repo.set_active(999, false).await?.is_none());
    assert!(repo.set_role(999, Role::Admin).await?.is_none());

    Ok(())
}
