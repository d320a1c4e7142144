use super::*;

/// Tests trimming a session to its most recent messages.
///
/// Expected: oldest messages removed, order preserved
#[tokio::test]
async fn trims_oldest_messages() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_ai_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let learner = factory::create_learner(db).await?;
    let session = factory::chat::create_chat_session(db, learner.id).await?;

    let repo = ChatMessageRepository::new(db);
    for i in 0..6 {
        repo.create(session.id, ChatRole::User, format!("message {}", i))
            .await?;
    }

    let removed = repo.trim_to(session.id, 4).await?;
    let messages = repo.get_by_session(session.id).await?;

    assert_eq!(removed, 2);
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[0].content, "message 2");
    assert_eq!(messages[3].content, "message 5");

    Ok(())
}

/// Tests trimming a session already under the limit.
///
/// Expected: nothing removed
#[tokio::test]
async fn trim_under_limit_is_noop() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_ai_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let learner = factory::create_learner(db).await?;
    let session = factory::chat::create_chat_session(db, learner.id).await?;
    factory::chat::create_chat_message(db, session.id, "user", "hi").await?;

    let repo = ChatMessageRepository::new(db);

    assert_eq!(repo.trim_to(session.id, 50).await?, 0);
    assert_eq!(repo.get_by_session(session.id).await?.len(), 1);

    Ok(())
}
