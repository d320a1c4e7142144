use super::*;

/// Tests enrolling a learner.
///
/// Expected: zero progress, findable by (user, course)
#[tokio::test]
async fn creates_enrollment_with_zero_progress() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_learning_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let learner = factory::create_learner(db).await?;
    let (_, course, _, _) = factory::helpers::create_published_course_with_lesson(db).await?;

    let repo = EnrollmentRepository::new(db);
    let enrollment = repo.create(learner.id, course.id).await?;

    assert_eq!(enrollment.progress, 0);
    assert!(!enrollment.completed);
    assert!(repo.is_enrolled(learner.id, course.id).await?);
    assert_eq!(repo.count_by_course(course.id).await?, 1);

    Ok(())
}

/// Tests that deleting by course leaves other courses' enrollments.
///
/// Expected: only the other course's enrollment remains
#[tokio::test]
async fn deletes_by_course() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_learning_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let learner = factory::create_learner(db).await?;
    let instructor = factory::create_instructor(db).await?;
    let doomed = factory::create_published_course(db, instructor.id).await?;
    let kept = factory::create_published_course(db, instructor.id).await?;
    factory::create_enrollment(db, learner.id, doomed.id).await?;
    factory::create_enrollment(db, learner.id, kept.id).await?;

    let repo = EnrollmentRepository::new(db);
    repo.delete_by_course(doomed.id).await?;

    let remaining = repo.get_by_user(learner.id).await?;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].course_id, kept.id);

    Ok(())
}
