use super::*;
use crate::server::{
    data::achievement::AchievementRepository,
    model::achievement::AchievementKind,
    service::enrollment::EnrollmentService,
};

/// Tests the enrollment guards and the first enrollment achievement.
///
/// Expected: first enroll Ok with achievement, second enroll "Already enrolled"
#[tokio::test]
async fn enroll_once_and_award_first_enrollment() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_learning_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, course, _, _) = factory::helpers::create_published_course_with_lesson(db).await?;
    let learner = factory::user::create_learner(db).await?;
    let service = EnrollmentService::new(db);

    let enrollment = service.enroll(learner.id, course.id).await?;
    assert_eq!(enrollment.progress, 0);

    let again = service.enroll(learner.id, course.id).await;
    assert!(matches!(again, Err(AppError::BadRequest(msg)) if msg == "Already enrolled"));

    let achievements = AchievementRepository::new(db).get_by_user(learner.id).await?;
    assert_eq!(achievements.len(), 1);
    assert_eq!(achievements[0].kind, AchievementKind::FirstEnrollment.as_str());

    Ok(())
}

/// Tests that unpublished courses and own courses cannot be enrolled in.
///
/// Expected: BadRequest for both
#[tokio::test]
async fn enroll_rejects_unpublished_and_own_course() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_learning_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let instructor = factory::user::create_instructor(db).await?;
    let draft = factory::create_course(db, instructor.id).await?;
    let published = factory::create_published_course(db, instructor.id).await?;
    let learner = factory::user::create_learner(db).await?;
    let service = EnrollmentService::new(db);

    assert!(matches!(
        service.enroll(learner.id, draft.id).await,
        Err(AppError::BadRequest(_))
    ));
    assert!(matches!(
        service.enroll(instructor.id, published.id).await,
        Err(AppError::BadRequest(_))
    ));
    assert!(matches!(
        service.enroll(learner.id, 9999).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}

/// Tests leaving a course.
///
/// Expected: Ok the first time, "Not enrolled" afterwards
#[tokio::test]
async fn unenroll_requires_enrollment() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_learning_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, course, _, _) = factory::helpers::create_published_course_with_lesson(db).await?;
    let learner = factory::user::create_learner(db).await?;
    factory::create_enrollment(db, learner.id, course.id).await?;
    let service = EnrollmentService::new(db);

    service.unenroll(learner.id, course.id).await?;
    let again = service.unenroll(learner.id, course.id).await;

    assert!(matches!(again, Err(AppError::BadRequest(msg)) if msg == "Not enrolled"));

    Ok(())
}

/// Tests progress validation and completion achievements.
///
/// Expected: out of range rejected, 100 completes and awards course completion once
#[tokio::test]
async fn progress_completion_awards_achievement() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_learning_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, course, _, _) = factory::helpers::create_published_course_with_lesson(db).await?;
    let learner = factory::user::create_learner(db).await?;
    factory::create_enrollment(db, learner.id, course.id).await?;
    let service = EnrollmentService::new(db);

    assert!(matches!(
        service.update_progress(learner.id, course.id, 101).await,
        Err(AppError::BadRequest(_))
    ));

    let partial = service.update_progress(learner.id, course.id, 40).await?;
    assert!(!partial.newly_completed);

    let done = service.update_progress(learner.id, course.id, 100).await?;
    assert!(done.newly_completed);
    assert!(done.enrollment.completed);
    assert!(done.enrollment.completed_at.is_some());

    let repeat = service.update_progress(learner.id, course.id, 100).await?;
    assert!(!repeat.newly_completed);
    assert_eq!(repeat.enrollment.completed_at, done.enrollment.completed_at);

    let achievements = AchievementRepository::new(db).get_by_user(learner.id).await?;
    let completed: Vec<_> = achievements
        .iter()
        .filter(|a| a.kind == AchievementKind::CourseCompleted.as_str())
        .collect();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].course_id, Some(course.id));

    Ok(())
}

/// Tests that the fifth completed course earns the milestone achievement.
///
/// Expected: milestone awarded exactly once after five completions
#[tokio::test]
async fn fifth_completion_awards_milestone() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_learning_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let instructor = factory::user::create_instructor(db).await?;
    let learner = factory::user::create_learner(db).await?;
    let service = EnrollmentService::new(db);
    let repo = AchievementRepository::new(db);
    let milestone = AchievementKind::FiveCoursesCompleted.as_str();

    for i in 0..5 {
        let course = factory::create_published_course(db, instructor.id).await?;
        factory::create_enrollment(db, learner.id, course.id).await?;
        service.update_progress(learner.id, course.id, 100).await?;

        let held = repo
            .get_by_user(learner.id)
            .await?
            .iter()
            .filter(|a| a.kind == milestone)
            .count();
        assert_eq!(held, if i < 4 { 0 } else { 1 });
    }

    Ok(())
}

/// Tests the learner listing for course managers.
///
/// Expected: owner sees enrolled learner with progress; other instructor denied
#[tokio::test]
async fn learners_visible_to_owner() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_learning_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (owner, course, _, _) = factory::helpers::create_published_course_with_lesson(db).await?;
    let other = factory::user::create_instructor(db).await?;
    let learner = factory::user::create_learner(db).await?;
    factory::enrollment::EnrollmentFactory::new(db, learner.id, course.id)
        .progress(60)
        .build()
        .await?;
    let service = EnrollmentService::new(db);

    let learners = service.get_learners(course.id, &owner).await?;
    assert_eq!(learners.len(), 1);
    assert_eq!(learners[0].user_id, learner.id);
    assert_eq!(learners[0].progress, 60);

    assert!(matches!(
        service.get_learners(course.id, &other).await,
        Err(AppError::AuthErr(_))
    ));

    Ok(())
}
