use super::*;

/// Tests creating a new account.
///
/// Verifies that new accounts are active, carry the requested role and have
/// no instructor application.
///
/// Expected: Ok with active learner
#[tokio::test]
async fn creates_active_user_without_application() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo
        .create(CreateUserParams {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "hash".to_string(),
            role: Role::Learner,
        })
        .await?;

    assert_eq!(user.name, "Ada");
    assert_eq!(user.role, Role::Learner);
    assert!(user.is_active);
    assert_eq!(user.application_status, ApplicationStatus::None);
    assert!(repo.email_exists("ada@example.com").await?);

    Ok(())
}

/// Tests that the unique email constraint rejects a second account.
///
/// Expected: Err
#[tokio::test]
async fn fails_on_duplicate_email() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let params = CreateUserParams {
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        password_hash: "hash".to_string(),
        role: Role::Learner,
    };
    repo.create(params.clone()).await?;

    let result = repo.create(params).await;

    assert!(result.is_err());

    Ok(())
}
