use super::*;
use chrono::{Duration, Utc};

/// Tests finding a user by an unexpired reset token digest.
///
/// Expected: Ok(Some) before expiry, Ok(None) after
#[tokio::test]
async fn finds_only_unexpired_tokens() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_learner(db).await?;
    let repo = UserRepository::new(db);
    let expires_at = Utc::now() + Duration::hours(1);
    repo.set_reset_token(user.id, "digest".to_string(), expires_at)
        .await?;

    let found = repo.find_by_reset_token("digest", Utc::now()).await?;
    assert_eq!(found.map(|u| u.id), Some(user.id));

    let expired = repo
        .find_by_reset_token("digest", expires_at + Duration::seconds(1))
        .await?;
    assert!(expired.is_none());

    Ok(())
}

/// Tests that changing the password clears the reset token.
///
/// Expected: token no longer resolves to the user
#[tokio::test]
async fn password_update_clears_token() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_learner(db).await?;
    let repo = UserRepository::new(db);
    repo.set_reset_token(user.id, "digest".to_string(), Utc::now() + Duration::hours(1))
        .await?;

    repo.update_password(user.id, "new-hash".to_string()).await?;

    assert!(repo.find_by_reset_token("digest", Utc::now()).await?.is_none());
    let model = repo.find_model_by_id(user.id).await?.unwrap();
    assert_eq!(model.password_hash, "new-hash");
    assert!(model.reset_token_expires_at.is_none());

    Ok(())
}
