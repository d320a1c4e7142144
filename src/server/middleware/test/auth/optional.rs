use super::*;

/// Tests that anonymous requests resolve to no viewer.
///
/// Expected: Ok(None)
#[tokio::test]
async fn anonymous_request_has_no_viewer() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let keys = keys();
    let token = AccessToken(None);

    let viewer = AuthGuard::new(db, &keys, &token).optional().await?;

    assert!(viewer.is_none());

    Ok(())
}

/// Tests that a bad token on an optional route is treated as anonymous.
///
/// Expected: Ok(None)
#[tokio::test]
async fn invalid_token_is_treated_as_anonymous() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let keys = keys();
    let token = AccessToken(Some("not-a-jwt".to_string()));

    let viewer = AuthGuard::new(db, &keys, &token).optional().await?;

    assert!(viewer.is_none());

    Ok(())
}

/// Tests that a valid token resolves the viewer.
///
/// Expected: Ok(Some(User))
#[tokio::test]
async fn valid_token_resolves_viewer() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_learner(db).await?;
    let keys = keys();
    let token = token_for(&keys, &user);

    let viewer = AuthGuard::new(db, &keys, &token).optional().await?;

    assert_eq!(viewer.map(|v| v.id), Some(user.id));

    Ok(())
}
