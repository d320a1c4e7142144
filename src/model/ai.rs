use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateChatSessionDto {
    pub course_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatSessionDto {
    pub id: i32,
    pub user_id: i32,
    pub course_id: Option<i32>,
    pub title: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatMessageDto {
    pub id: i32,
    pub role: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatSessionDetailDto {
    pub session: ChatSessionDto,
    pub messages: Vec<ChatMessageDto>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SendMessageDto {
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SendMessageResponseDto {
    pub session: ChatSessionDto,
    pub user_message: ChatMessageDto,
    pub assistant_message: ChatMessageDto,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AiAnalyticsDto {
    pub course_id: Option<i32>,
    pub total_sessions: i32,
    pub total_messages: i32,
    pub total_tokens: i64,
    pub last_interaction_at: DateTime<Utc>,
}
