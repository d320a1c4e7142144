use super::*;

/// Tests reaching 100% progress completes the enrollment.
///
/// Expected: completed with completed_at set
#[tokio::test]
async fn completes_at_full_progress() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_learning_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let learner = factory::create_learner(db).await?;
    let (_, course, _, _) = factory::helpers::create_published_course_with_lesson(db).await?;
    let enrollment = factory::create_enrollment(db, learner.id, course.id).await?;

    let repo = EnrollmentRepository::new(db);
    let halfway = repo.update_progress(enrollment.id, 50).await?.unwrap();
    assert!(!halfway.completed);
    assert!(halfway.last_accessed_at.is_some());

    let done = repo.update_progress(enrollment.id, 100).await?.unwrap();
    assert!(done.completed);
    assert!(done.completed_at.is_some());
    assert_eq!(repo.count_completed_by_user(learner.id).await?, 1);

    Ok(())
}

/// Tests that completed_at is only set the first time.
///
/// Expected: completed_at unchanged on a second completion
#[tokio::test]
async fn keeps_first_completion_time() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_learning_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let learner = factory::create_learner(db).await?;
    let (_, course, _, _) = factory::helpers::create_published_course_with_lesson(db).await?;
    let enrollment = factory::enrollment::EnrollmentFactory::new(db, learner.id, course.id)
        .progress(100)
        .build()
        .await?;

    let repo = EnrollmentRepository::new(db);
    let again = repo.update_progress(enrollment.id, 100).await?.unwrap();

    assert_eq!(again.completed_at, enrollment.completed_at);

    Ok(())
}
