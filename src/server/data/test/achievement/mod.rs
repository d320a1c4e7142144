use crate::server::{
    data::achievement::AchievementRepository, model::achievement::AchievementKind,
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

/// Tests awarding an achievement once per kind and course.
///
/// Expected: second award of the same kind and course is skipped
#[tokio::test]
async fn awards_each_kind_once() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_learning_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let learner = factory::create_learner(db).await?;
    let repo = AchievementRepository::new(db);

    let first = repo
        .award(learner.id, AchievementKind::FirstEnrollment, None)
        .await?;
    let duplicate = repo
        .award(learner.id, AchievementKind::FirstEnrollment, None)
        .await?;

    assert_eq!(first.map(|a| a.title), Some("First Steps".to_string()));
    assert!(duplicate.is_none());

    Ok(())
}

/// Tests that course completions are awarded per course.
///
/// Expected: two achievements for two different courses
#[tokio::test]
async fn awards_completion_per_course() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_learning_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let learner = factory::create_learner(db).await?;
    let instructor = factory::create_instructor(db).await?;
    let first = factory::create_published_course(db, instructor.id).await?;
    let second = factory::create_published_course(db, instructor.id).await?;

    let repo = AchievementRepository::new(db);
    repo.award(learner.id, AchievementKind::CourseCompleted, Some(first.id))
        .await?;
    repo.award(learner.id, AchievementKind::CourseCompleted, Some(second.id))
        .await?;
    repo.award(learner.id, AchievementKind::CourseCompleted, Some(second.id))
        .await?;

    let achievements = repo.get_by_user(learner.id).await?;
    assert_eq!(achievements.len(), 2);
    assert!(achievements.iter().all(|a| a.kind == "course_completed"));

    Ok(())
}
