//! AI learning assistant chat.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        ai::{AiAnalyticsRepository, ChatMessageRepository, ChatSessionRepository},
        course::CourseRepository,
        section::SectionRepository,
    },
    error::{provider::ProviderError, AppError},
    model::ai::{
        derive_title, AiAnalytics, ChatExchange, ChatRole, ChatSession, ChatSessionDetail,
        DEFAULT_SESSION_TITLE, MAX_MESSAGE_CHARS, MAX_SESSION_MESSAGES,
    },
    provider::ai::{ChatCompletion, PromptMessage},
    service::course::course_not_found,
};

const ASSISTANT_PROMPT: &str = "You are a helpful learning assistant for an online \
learning platform. Explain concepts clearly, encourage the learner and keep answers \
focused on the learner's question.";

pub struct AiChatService<'a> {
    db: &'a DatabaseConnection,
    completion: Option<&'a dyn ChatCompletion>,
}

impl<'a> AiChatService<'a> {
    /// Creates the service. `completion` is `None` when no AI API key is configured,
    /// in which case sending messages fails with 503.
    pub fn new(db: &'a DatabaseConnection, completion: Option<&'a dyn ChatCompletion>) -> Self {
        Self { db, completion }
    }

    /// Opens a new chat session, optionally scoped to a course.
    pub async fn create_session(
        &self,
        user_id: i32,
        course_id: Option<i32>,
    ) -> Result<ChatSession, AppError> {
        if let Some(course_id) = course_id {
            if CourseRepository::new(self.db)
                .find_by_id(course_id)
                .await?
                .is_none()
            {
                return Err(course_not_found());
            }
        }

        let session = ChatSessionRepository::new(self.db)
            .create(user_id, course_id)
            .await?;
        AiAnalyticsRepository::new(self.db)
            .increment(user_id, course_id, 1, 0, 0)
            .await?;

        Ok(session)
    }

    pub async fn get_sessions(
        &self,
        user_id: i32,
        course_id: Option<i32>,
    ) -> Result<Vec<ChatSession>, AppError> {
        Ok(ChatSessionRepository::new(self.db)
            .get_active_by_user(user_id, course_id)
            .await?)
    }

    /// Gets one of the user's sessions with its messages in order.
    pub async fn get_session(
        &self,
        session_id: i32,
        user_id: i32,
    ) -> Result<ChatSessionDetail, AppError> {
        let session = self.find_session(session_id, user_id).await?;
        let messages = ChatMessageRepository::new(self.db)
            .get_by_session(session_id)
            .await?;

        Ok(ChatSessionDetail { session, messages })
    }

    /// Sends a user message and stores the assistant's reply.
    ///
    /// The completion API is called before anything is written, so a failed
    /// call leaves the session untouched. After storing both messages the
    /// session is trimmed to [`MAX_SESSION_MESSAGES`], an untitled session is
    /// named after the message, and usage analytics are updated.
    ///
    /// # Returns
    /// - `Ok(ChatExchange)` - Updated session and both stored messages
    /// - `Err(AppError::BadRequest)` - Empty or oversized message, or inactive session
    /// - `Err(AppError::NotFound)` - Session missing or owned by another user
    /// - `Err(AppError::ProviderErr)` - AI not configured (503) or upstream failure (502)
    pub async fn send_message(
        &self,
        session_id: i32,
        user_id: i32,
        content: &str,
    ) -> Result<ChatExchange, AppError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::BadRequest(
                "Message content is required".to_string(),
            ));
        }
        if content.chars().count() > MAX_MESSAGE_CHARS {
            return Err(AppError::BadRequest(format!(
                "Message must be at most {} characters",
                MAX_MESSAGE_CHARS
            )));
        }

        let session = self.find_session(session_id, user_id).await?;
        if !session.is_active {
            return Err(AppError::BadRequest(
                "Chat session is no longer active".to_string(),
            ));
        }

        let completion = self
            .completion
            .ok_or(ProviderError::NotConfigured("AI assistant"))?;

        let message_repo = ChatMessageRepository::new(self.db);
        let history = message_repo.get_by_session(session_id).await?;

        let mut prompt = vec![PromptMessage::new(
            ChatRole::System,
            self.system_prompt(session.course_id).await?,
        )];
        prompt.extend(history.into_iter().filter_map(|m| {
            ChatRole::parse(&m.role).map(|role| PromptMessage::new(role, m.content))
        }));
        prompt.push(PromptMessage::new(ChatRole::User, content));

        let reply = completion.complete(prompt).await?;

        let user_message = message_repo
            .create(session_id, ChatRole::User, content.to_string())
            .await?;
        let assistant_message = message_repo
            .create(session_id, ChatRole::Assistant, reply.content)
            .await?;

        let trimmed = message_repo
            .trim_to(session_id, MAX_SESSION_MESSAGES)
            .await?;
        if trimmed > 0 {
            tracing::debug!("Trimmed {} old messages from session {}", trimmed, session_id);
        }

        let title = (session.title == DEFAULT_SESSION_TITLE).then(|| derive_title(content));
        let session = ChatSessionRepository::new(self.db)
            .touch(session_id, title)
            .await?
            .ok_or_else(session_not_found)?;

        AiAnalyticsRepository::new(self.db)
            .increment(user_id, session.course_id, 0, 2, reply.total_tokens)
            .await?;

        Ok(ChatExchange {
            session,
            user_message,
            assistant_message,
        })
    }

    /// Closes a session. Its messages are kept.
    pub async fn delete_session(&self, session_id: i32, user_id: i32) -> Result<(), AppError> {
        self.find_session(session_id, user_id).await?;

        ChatSessionRepository::new(self.db)
            .deactivate(session_id)
            .await?;

        Ok(())
    }

    pub async fn get_analytics(&self, user_id: i32) -> Result<Vec<AiAnalytics>, AppError> {
        Ok(AiAnalyticsRepository::new(self.db)
            .get_by_user(user_id)
            .await?)
    }

    async fn find_session(&self, session_id: i32, user_id: i32) -> Result<ChatSession, AppError> {
        ChatSessionRepository::new(self.db)
            .find_owned(session_id, user_id)
            .await?
            .ok_or_else(session_not_found)
    }

    /// Base assistant instructions, extended with the course outline when the
    /// session is scoped to a course.
    async fn system_prompt(&self, course_id: Option<i32>) -> Result<String, AppError> {
        let Some(course_id) = course_id else {
            return Ok(ASSISTANT_PROMPT.to_string());
        };
        let Some(course) = CourseRepository::new(self.db).find_by_id(course_id).await? else {
            return Ok(ASSISTANT_PROMPT.to_string());
        };

        let sections = SectionRepository::new(self.db)
            .get_by_course(course_id)
            .await?
            .into_iter()
            .map(|s| s.title)
            .collect::<Vec<_>>()
            .join(", ");

        Ok(format!(
            "{}\n\nThe learner is studying the course \"{}\".\nCourse description: {}\nSections: {}",
            ASSISTANT_PROMPT, course.title, course.description, sections
        ))
    }
}

fn session_not_found() -> AppError {
    AppError::NotFound("Chat session not found".to_string())
}
