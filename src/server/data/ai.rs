//! AI chat session, message and analytics repositories.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::server::model::ai::{
    AiAnalytics, ChatMessage, ChatRole, ChatSession, DEFAULT_SESSION_TITLE,
};

pub struct ChatSessionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ChatSessionRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates an active session titled [`DEFAULT_SESSION_TITLE`].
    pub async fn create(&self, user_id: i32, course_id: Option<i32>) -> Result<ChatSession, DbErr> {
        let now = Utc::now();
        let entity = entity::ai_chat_session::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            course_id: ActiveValue::Set(course_id),
            title: ActiveValue::Set(DEFAULT_SESSION_TITLE.to_string()),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(ChatSession::from_entity(entity))
    }

    /// Finds a session owned by `user_id`.
    ///
    /// Sessions of other users are reported as missing.
    pub async fn find_owned(
        &self,
        session_id: i32,
        user_id: i32,
    ) -> Result<Option<ChatSession>, DbErr> {
        let entity = entity::prelude::AiChatSession::find_by_id(session_id)
            .filter(entity::ai_chat_session::Column::UserId.eq(user_id))
            .one(self.db)
            .await?;

        Ok(entity.map(ChatSession::from_entity))
    }

    /// Gets a user's active sessions, most recently updated first.
    pub async fn get_active_by_user(
        &self,
        user_id: i32,
        course_id: Option<i32>,
    ) -> Result<Vec<ChatSession>, DbErr> {
        let mut query = entity::prelude::AiChatSession::find()
            .filter(entity::ai_chat_session::Column::UserId.eq(user_id))
            .filter(entity::ai_chat_session::Column::IsActive.eq(true));
        if let Some(course_id) = course_id {
            query = query.filter(entity::ai_chat_session::Column::CourseId.eq(course_id));
        }

        let entities = query
            .order_by_desc(entity::ai_chat_session::Column::UpdatedAt)
            .order_by_desc(entity::ai_chat_session::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(ChatSession::from_entity).collect())
    }

    /// Bumps `updated_at` and optionally replaces the title.
    pub async fn touch(
        &self,
        session_id: i32,
        title: Option<String>,
    ) -> Result<Option<ChatSession>, DbErr> {
        let Some(model) = entity::prelude::AiChatSession::find_by_id(session_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active = model.into_active_model();
        active.updated_at = ActiveValue::Set(Utc::now());
        if let Some(title) = title {
            active.title = ActiveValue::Set(title);
        }

        let updated = active.update(self.db).await?;
        Ok(Some(ChatSession::from_entity(updated)))
    }

    pub async fn deactivate(&self, session_id: i32) -> Result<(), DbErr> {
        entity::prelude::AiChatSession::update_many()
            .col_expr(
                entity::ai_chat_session::Column::IsActive,
                sea_orm::sea_query::Expr::value(false),
            )
            .col_expr(
                entity::ai_chat_session::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .filter(entity::ai_chat_session::Column::Id.eq(session_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Gets ids of every session scoped to a course.
    pub async fn get_ids_by_course(&self, course_id: i32) -> Result<Vec<i32>, DbErr> {
        let entities = entity::prelude::AiChatSession::find()
            .filter(entity::ai_chat_session::Column::CourseId.eq(course_id))
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(|s| s.id).collect())
    }

    /// Gets ids of every session owned by a user.
    pub async fn get_ids_by_user(&self, user_id: i32) -> Result<Vec<i32>, DbErr> {
        let entities = entity::prelude::AiChatSession::find()
            .filter(entity::ai_chat_session::Column::UserId.eq(user_id))
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(|s| s.id).collect())
    }

    pub async fn delete_many(&self, session_ids: Vec<i32>) -> Result<(), DbErr> {
        if session_ids.is_empty() {
            return Ok(());
        }

        entity::prelude::AiChatSession::delete_many()
            .filter(entity::ai_chat_session::Column::Id.is_in(session_ids))
            .exec(self.db)
            .await?;

        Ok(())
    }
}

pub struct ChatMessageRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ChatMessageRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        session_id: i32,
        role: ChatRole,
        content: String,
    ) -> Result<ChatMessage, DbErr> {
        let entity = entity::ai_chat_message::ActiveModel {
            session_id: ActiveValue::Set(session_id),
            role: ActiveValue::Set(role.as_str().to_string()),
            content: ActiveValue::Set(content),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(ChatMessage::from_entity(entity))
    }

    /// Gets a session's messages in conversation order.
    pub async fn get_by_session(&self, session_id: i32) -> Result<Vec<ChatMessage>, DbErr> {
        let entities = entity::prelude::AiChatMessage::find()
            .filter(entity::ai_chat_message::Column::SessionId.eq(session_id))
            .order_by_asc(entity::ai_chat_message::Column::CreatedAt)
            .order_by_asc(entity::ai_chat_message::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(ChatMessage::from_entity).collect())
    }

    /// Drops the oldest messages of a session so that at most `keep` remain.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of deleted messages
    /// - `Err(DbErr)` - Database error
    pub async fn trim_to(&self, session_id: i32, keep: u64) -> Result<u64, DbErr> {
        let messages = self.get_by_session(session_id).await?;
        let excess = (messages.len() as u64).saturating_sub(keep) as usize;
        if excess == 0 {
            return Ok(0);
        }

        let stale: Vec<i32> = messages.iter().take(excess).map(|m| m.id).collect();
        let result = entity::prelude::AiChatMessage::delete_many()
            .filter(entity::ai_chat_message::Column::Id.is_in(stale))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn delete_by_sessions(&self, session_ids: Vec<i32>) -> Result<(), DbErr> {
        if session_ids.is_empty() {
            return Ok(());
        }

        entity::prelude::AiChatMessage::delete_many()
            .filter(entity::ai_chat_message::Column::SessionId.is_in(session_ids))
            .exec(self.db)
            .await?;

        Ok(())
    }
}

/// Per-user, per-course usage counters.
pub struct AiAnalyticsRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AiAnalyticsRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Adds to the counters of the `(user_id, course_id)` row, creating it on first use.
    pub async fn increment(
        &self,
        user_id: i32,
        course_id: Option<i32>,
        sessions: i32,
        messages: i32,
        tokens: i64,
    ) -> Result<AiAnalytics, DbErr> {
        let mut query = entity::prelude::AiAnalytics::find()
            .filter(entity::ai_analytics::Column::UserId.eq(user_id));
        query = match course_id {
            Some(course_id) => query.filter(entity::ai_analytics::Column::CourseId.eq(course_id)),
            None => query.filter(entity::ai_analytics::Column::CourseId.is_null()),
        };

        let now = Utc::now();
        let entity = match query.one(self.db).await? {
            Some(model) => {
                let total_sessions = model.total_sessions + sessions;
                let total_messages = model.total_messages + messages;
                let total_tokens = model.total_tokens + tokens;

                let mut active = model.into_active_model();
                active.total_sessions = ActiveValue::Set(total_sessions);
                active.total_messages = ActiveValue::Set(total_messages);
                active.total_tokens = ActiveValue::Set(total_tokens);
                active.last_interaction_at = ActiveValue::Set(now);
                active.update(self.db).await?
            }
            None => {
                entity::ai_analytics::ActiveModel {
                    user_id: ActiveValue::Set(user_id),
                    course_id: ActiveValue::Set(course_id),
                    total_sessions: ActiveValue::Set(sessions),
                    total_messages: ActiveValue::Set(messages),
                    total_tokens: ActiveValue::Set(tokens),
                    last_interaction_at: ActiveValue::Set(now),
                    ..Default::default()
                }
                .insert(self.db)
                .await?
            }
        };

        Ok(AiAnalytics::from_entity(entity))
    }

    /// Gets a user's analytics rows, most recent interaction first.
    pub async fn get_by_user(&self, user_id: i32) -> Result<Vec<AiAnalytics>, DbErr> {
        let entities = entity::prelude::AiAnalytics::find()
            .filter(entity::ai_analytics::Column::UserId.eq(user_id))
            .order_by_desc(entity::ai_analytics::Column::LastInteractionAt)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(AiAnalytics::from_entity).collect())
    }

    pub async fn delete_by_course(&self, course_id: i32) -> Result<(), DbErr> {
        entity::prelude::AiAnalytics::delete_many()
            .filter(entity::ai_analytics::Column::CourseId.eq(course_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn delete_by_user(&self, user_id: i32) -> Result<(), DbErr> {
        entity::prelude::AiAnalytics::delete_many()
            .filter(entity::ai_analytics::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(())
    }
}
