use super::*;

/// Tests that a request without a token is rejected.
///
/// Expected: Err(AuthErr(MissingToken))
#[tokio::test]
async fn rejects_missing_token() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let keys = keys();
    let token = AccessToken(None);

    let result = AuthGuard::new(db, &keys, &token).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::MissingToken))
    ));

    Ok(())
}

/// Tests that a token signed with another secret is rejected.
///
/// Expected: Err(AuthErr(InvalidToken))
#[tokio::test]
async fn rejects_foreign_signature() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_learner(db).await?;
    let keys = keys();
    let token = token_for(&JwtKeys::new("some-other-secret", 1), &user);

    let result = AuthGuard::new(db, &keys, &token).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidToken(_)))
    ));

    Ok(())
}

/// Tests that any active user passes an empty permission list.
///
/// Expected: Ok(User)
#[tokio::test]
async fn admits_authenticated_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_learner(db).await?;
    let keys = keys();
    let token = token_for(&keys, &user);

    let resolved = AuthGuard::new(db, &keys, &token).require(&[]).await?;

    assert_eq!(resolved.id, user.id);

    Ok(())
}

/// Tests that tokens of deleted users are rejected.
///
/// Expected: Err(AuthErr(UserNotInDatabase))
#[tokio::test]
async fn rejects_deleted_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let keys = keys();
    let token = AccessToken(Some(keys.issue(4242, "learner")?));

    let result = AuthGuard::new(db, &keys, &token).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotInDatabase(4242)))
    ));

    Ok(())
}

/// Tests that disabled accounts are refused even with a valid token.
///
/// Expected: Err(AuthErr(AccountDisabled))
#[tokio::test]
async fn rejects_disabled_account() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::user::UserFactory::new(db).active(false).build().await?;
    let keys = keys();
    let token = token_for(&keys, &user);

    let result = AuthGuard::new(db, &keys, &token).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccountDisabled(_)))
    ));

    Ok(())
}

/// Tests role checks for the instructor permission.
///
/// Verifies learners are refused while instructors and admins pass.
///
/// Expected: AccessDenied for learner, Ok for instructor and admin
#[tokio::test]
async fn instructor_permission_admits_instructors_and_admins() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let keys = keys();
    let learner = factory::create_learner(db).await?;
    let instructor = factory::create_instructor(db).await?;
    let admin = factory::create_admin(db).await?;

    let learner_token = token_for(&keys, &learner);
    let denied = AuthGuard::new(db, &keys, &learner_token)
        .require(&[Permission::Instructor])
        .await;
    assert!(matches!(
        denied,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    let instructor_token = token_for(&keys, &instructor);
    AuthGuard::new(db, &keys, &instructor_token)
        .require(&[Permission::Instructor])
        .await?;

    let admin_token = token_for(&keys, &admin);
    AuthGuard::new(db, &keys, &admin_token)
        .require(&[Permission::Instructor])
        .await?;

    Ok(())
}

/// Tests that the admin permission refuses instructors.
///
/// Expected: Err(AuthErr(AccessDenied))
#[tokio::test]
async fn admin_permission_refuses_instructor() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let keys = keys();
    let instructor = factory::create_instructor(db).await?;
    let token = token_for(&keys, &instructor);

    let result = AuthGuard::new(db, &keys, &token)
        .require(&[Permission::Admin])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}
