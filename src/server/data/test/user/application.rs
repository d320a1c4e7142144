use super::*;

/// Tests submitting and approving an instructor application.
///
/// Verifies approval promotes the applicant and records the reviewer.
///
/// Expected: approved status and instructor role
#[tokio::test]
async fn approval_promotes_applicant() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let learner = factory::create_learner(db).await?;
    let admin = factory::create_admin(db).await?;
    let repo = UserRepository::new(db);

    let pending = repo
        .submit_application(learner.id, "I love teaching".to_string(), None)
        .await?
        .unwrap();
    assert_eq!(pending.status, "pending");
    assert!(pending.submitted_at.is_some());

    let approved = repo
        .review_application(learner.id, admin.id, true, None)
        .await?
        .unwrap();
    assert_eq!(approved.status, "approved");
    assert_eq!(approved.reviewed_by, Some(admin.id));

    let user = repo.find_by_id(learner.id).await?.unwrap();
    assert_eq!(user.role, Role::Instructor);

    Ok(())
}

/// Tests rejecting an application keeps the role and stores the reason.
///
/// Expected: rejected status, learner role
#[tokio::test]
async fn rejection_keeps_role() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let learner = factory::user::UserFactory::new(db)
        .application_status("pending")
        .build()
        .await?;
    let admin = factory::create_admin(db).await?;
    let repo = UserRepository::new(db);

    let rejected = repo
        .review_application(learner.id, admin.id, false, Some("Too vague".to_string()))
        .await?
        .unwrap();

    assert_eq!(rejected.status, "rejected");
    assert_eq!(rejected.rejection_reason.as_deref(), Some("Too vague"));
    let user = repo.find_by_id(learner.id).await?.unwrap();
    assert_eq!(user.role, Role::Learner);

    Ok(())
}

/// Tests listing and counting applications by status.
///
/// Expected: only pending applications listed
#[tokio::test]
async fn lists_applications_by_status() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let pending = factory::user::UserFactory::new(db)
        .application_status("pending")
        .build()
        .await?;
    factory::create_learner(db).await?;

    let repo = UserRepository::new(db);
    let applications = repo
        .get_applications_by_status(ApplicationStatus::Pending)
        .await?;

    assert_eq!(applications.len(), 1);
    assert_eq!(applications[0].user_id, pending.id);
    assert_eq!(repo.count_applications(ApplicationStatus::Pending).await?, 1);
    assert_eq!(repo.count_applications(ApplicationStatus::None).await?, 1);

    Ok(())
}
