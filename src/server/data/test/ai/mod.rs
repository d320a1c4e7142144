use crate::server::{
    data::ai::{AiAnalyticsRepository, ChatMessageRepository, ChatSessionRepository},
    model::ai::{ChatRole, DEFAULT_SESSION_TITLE},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod analytics;
mod message;
mod session;
