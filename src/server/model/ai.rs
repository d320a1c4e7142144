//! AI chat session, message and usage analytics models.

use chrono::{DateTime, Utc};

use crate::model::ai::{
    AiAnalyticsDto, ChatMessageDto, ChatSessionDetailDto, ChatSessionDto, SendMessageResponseDto,
};

/// Title given to sessions until the first user message names them.
pub const DEFAULT_SESSION_TITLE: &str = "New Chat";
/// Upper bound on stored messages per session; older ones are dropped.
pub const MAX_SESSION_MESSAGES: u64 = 50;
/// Maximum characters in a single user message.
pub const MAX_MESSAGE_CHARS: usize = 4000;
/// Characters of the first message kept when deriving a session title.
pub const TITLE_MAX_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::System => "system",
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "system" => Some(ChatRole::System),
            "user" => Some(ChatRole::User),
            "assistant" => Some(ChatRole::Assistant),
            _ => None,
        }
    }
}

/// Derives a session title from the first user message.
///
/// Keeps the first [`TITLE_MAX_CHARS`] characters and appends `...` when cut.
pub fn derive_title(content: &str) -> String {
    let content = content.trim();
    if content.chars().count() > TITLE_MAX_CHARS {
        let cut: String = content.chars().take(TITLE_MAX_CHARS).collect();
        format!("{}...", cut)
    } else {
        content.to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatSession {
    pub id: i32,
    pub user_id: i32,
    pub course_id: Option<i32>,
    pub title: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChatSession {
    pub fn from_entity(entity: entity::ai_chat_session::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            course_id: entity.course_id,
            title: entity.title,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> ChatSessionDto {
        ChatSessionDto {
            id: self.id,
            user_id: self.user_id,
            course_id: self.course_id,
            title: self.title,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: i32,
    pub session_id: i32,
    pub role: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn from_entity(entity: entity::ai_chat_message::Model) -> Self {
        Self {
            id: entity.id,
            session_id: entity.session_id,
            role: entity.role,
            content: entity.content,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> ChatMessageDto {
        ChatMessageDto {
            id: self.id,
            role: self.role,
            content: self.content,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChatSessionDetail {
    pub session: ChatSession,
    pub messages: Vec<ChatMessage>,
}

impl ChatSessionDetail {
    pub fn into_dto(self) -> ChatSessionDetailDto {
        ChatSessionDetailDto {
            session: self.session.into_dto(),
            messages: self
                .messages
                .into_iter()
                .map(ChatMessage::into_dto)
                .collect(),
        }
    }
}

/// Outcome of a successful exchange with the assistant.
#[derive(Debug, Clone)]
pub struct ChatExchange {
    pub session: ChatSession,
    pub user_message: ChatMessage,
    pub assistant_message: ChatMessage,
}

impl ChatExchange {
    pub fn into_dto(self) -> SendMessageResponseDto {
        SendMessageResponseDto {
            session: self.session.into_dto(),
            user_message: self.user_message.into_dto(),
            assistant_message: self.assistant_message.into_dto(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AiAnalytics {
    pub user_id: i32,
    pub course_id: Option<i32>,
    pub total_sessions: i32,
    pub total_messages: i32,
    pub total_tokens: i64,
    pub last_interaction_at: DateTime<Utc>,
}

impl AiAnalytics {
    pub fn from_entity(entity: entity::ai_analytics::Model) -> Self {
        Self {
            user_id: entity.user_id,
            course_id: entity.course_id,
            total_sessions: entity.total_sessions,
            total_messages: entity.total_messages,
            total_tokens: entity.total_tokens,
            last_interaction_at: entity.last_interaction_at,
        }
    }

    pub fn into_dto(self) -> AiAnalyticsDto {
        AiAnalyticsDto {
            course_id: self.course_id,
            total_sessions: self.total_sessions,
            total_messages: self.total_messages,
            total_tokens: self.total_tokens,
            last_interaction_at: self.last_interaction_at,
        }
    }
}
