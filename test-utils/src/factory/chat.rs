//! AI chat session and message factories.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating AI chat sessions.
pub struct ChatSessionFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    course_id: Option<i32>,
    title: String,
    is_active: bool,
}

impl<'a> ChatSessionFactory<'a> {
    /// Creates an active, untitled (`"New Chat"`) session factory.
    pub fn new(db: &'a DatabaseConnection, user_id: i32) -> Self {
        Self {
            db,
            user_id,
            course_id: None,
            title: "New Chat".to_string(),
            is_active: true,
        }
    }

    pub fn course_id(mut self, course_id: i32) -> Self {
        self.course_id = Some(course_id);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub async fn build(self) -> Result<entity::ai_chat_session::Model, DbErr> {
        let now = Utc::now();
        entity::ai_chat_session::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            course_id: ActiveValue::Set(self.course_id),
            title: ActiveValue::Set(self.title),
            is_active: ActiveValue::Set(self.is_active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an active untitled session for `user_id`.
pub async fn create_chat_session(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<entity::ai_chat_session::Model, DbErr> {
    ChatSessionFactory::new(db, user_id).build().await
}

/// Appends a message with the given role to a session.
pub async fn create_chat_message(
    db: &DatabaseConnection,
    session_id: i32,
    role: &str,
    content: impl Into<String>,
) -> Result<entity::ai_chat_message::Model, DbErr> {
    entity::ai_chat_message::ActiveModel {
        session_id: ActiveValue::Set(session_id),
        role: ActiveValue::Set(role.to_string()),
        content: ActiveValue::Set(content.into()),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}
