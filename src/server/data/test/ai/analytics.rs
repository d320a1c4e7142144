use super::*;

/// Tests that counters accumulate on one row per user and course.
///
/// Expected: single row with summed counters
#[tokio::test]
async fn accumulates_counters() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_ai_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let learner = factory::create_learner(db).await?;
    let repo = AiAnalyticsRepository::new(db);

    repo.increment(learner.id, None, 1, 0, 0).await?;
    let analytics = repo.increment(learner.id, None, 0, 2, 120).await?;

    assert_eq!(analytics.total_sessions, 1);
    assert_eq!(analytics.total_messages, 2);
    assert_eq!(analytics.total_tokens, 120);
    assert_eq!(repo.get_by_user(learner.id).await?.len(), 1);

    Ok(())
}

/// Tests that course-scoped usage is tracked separately.
///
/// Expected: two rows for general and course usage
#[tokio::test]
async fn separates_rows_per_course() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_course_tables()
        .with_ai_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let learner = factory::create_learner(db).await?;
    let instructor = factory::create_instructor(db).await?;
    let course = factory::create_published_course(db, instructor.id).await?;

    let repo = AiAnalyticsRepository::new(db);
    repo.increment(learner.id, None, 1, 0, 0).await?;
    repo.increment(learner.id, Some(course.id), 1, 0, 0).await?;

    assert_eq!(repo.get_by_user(learner.id).await?.len(), 2);

    Ok(())
}
