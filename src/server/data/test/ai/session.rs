use super::*;

/// Tests creating a session with the default title.
///
/// Expected: active session titled "New Chat"
#[tokio::test]
async fn creates_active_default_session() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_ai_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let learner = factory::create_learner(db).await?;
    let repo = ChatSessionRepository::new(db);

    let session = repo.create(learner.id, None).await?;

    assert_eq!(session.title, DEFAULT_SESSION_TITLE);
    assert!(session.is_active);

    Ok(())
}

/// Tests that sessions of other users are not found.
///
/// Expected: Ok(None) for a foreign session
#[tokio::test]
async fn hides_other_users_sessions() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_ai_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_learner(db).await?;
    let stranger = factory::create_learner(db).await?;
    let session = factory::chat::create_chat_session(db, owner.id).await?;

    let repo = ChatSessionRepository::new(db);

    assert!(repo.find_owned(session.id, owner.id).await?.is_some());
    assert!(repo.find_owned(session.id, stranger.id).await?.is_none());

    Ok(())
}

/// Tests listing only active sessions, optionally per course.
///
/// Expected: deactivated and other-course sessions excluded
#[tokio::test]
async fn lists_active_sessions() -> Result<(), DbErr> {
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
    let general = factory::chat::create_chat_session(db, learner.id).await?;
    let scoped = factory::chat::ChatSessionFactory::new(db, learner.id)
        .course_id(course.id)
        .build()
        .await?;
    let closed = factory::chat::create_chat_session(db, learner.id).await?;

    let repo = ChatSessionRepository::new(db);
    repo.deactivate(closed.id).await?;

    let all = repo.get_active_by_user(learner.id, None).await?;
    let mut ids: Vec<i32> = all.iter().map(|s| s.id).collect();
    ids.sort();
    assert_eq!(ids, vec![general.id, scoped.id]);

    let for_course = repo.get_active_by_user(learner.id, Some(course.id)).await?;
    assert_eq!(for_course.len(), 1);
    assert_eq!(for_course[0].id, scoped.id);

    Ok(())
}
