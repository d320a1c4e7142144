use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    model::{
        ai::{
            AiAnalyticsDto, ChatSessionDetailDto, ChatSessionDto, CreateChatSessionDto,
            SendMessageDto, SendMessageResponseDto,
        },
        api::ErrorDto,
    },
    server::{
        error::AppError,
        middleware::auth::{AccessToken, AuthGuard},
        service::ai::AiChatService,
        state::AppState,
    },
};

/// Tag for grouping AI assistant endpoints in OpenAPI documentation
pub static AI_TAG: &str = "ai";

#[derive(Deserialize)]
pub struct SessionListParams {
    pub course_id: Option<i32>,
}

/// Start a chat session, optionally scoped to a course.
///
/// # Returns
/// - `201 Created` - New active session titled "New Chat"
/// - `404 Not Found` - Course not found
/// - `429 Too Many Requests` - Rate limit exceeded
#[utoipa::path(
    post,
    path = "/api/ai/sessions",
    tag = AI_TAG,
    request_body = CreateChatSessionDto,
    responses(
        (status = 201, description = "Session created", body = ChatSessionDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "Course not found", body = ErrorDto),
        (status = 429, description = "Rate limit exceeded")
    ),
    security(("bearer" = [])),
)]
pub async fn create_session(
    State(state): State<AppState>,
    token: AccessToken,
    Json(payload): Json<CreateChatSessionDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let session = AiChatService::new(&state.db, state.ai.as_deref())
        .create_session(user.id, payload.course_id)
        .await?;

    Ok((StatusCode::CREATED, Json(session.into_dto())))
}

/// The caller's active sessions, most recently updated first.
#[utoipa::path(
    get,
    path = "/api/ai/sessions",
    tag = AI_TAG,
    params(("course_id" = Option<i32>, Query, description = "Only sessions scoped to this course")),
    responses(
        (status = 200, description = "Active sessions", body = Vec<ChatSessionDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 429, description = "Rate limit exceeded")
    ),
    security(("bearer" = [])),
)]
pub async fn get_sessions(
    State(state): State<AppState>,
    token: AccessToken,
    Query(params): Query<SessionListParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let sessions = AiChatService::new(&state.db, state.ai.as_deref())
        .get_sessions(user.id, params.course_id)
        .await?;

    let dtos: Vec<ChatSessionDto> = sessions.into_iter().map(|s| s.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// A session with its messages in order. Other users' sessions answer 404.
#[utoipa::path(
    get,
    path = "/api/ai/sessions/{session_id}",
    tag = AI_TAG,
    params(("session_id" = i32, Path, description = "Chat session ID")),
    responses(
        (status = 200, description = "Session with messages", body = ChatSessionDetailDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "Session not found", body = ErrorDto),
        (status = 429, description = "Rate limit exceeded")
    ),
    security(("bearer" = [])),
)]
pub async fn get_session(
    State(state): State<AppState>,
    token: AccessToken,
    Path(session_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let detail = AiChatService::new(&state.db, state.ai.as_deref())
        .get_session(session_id, user.id)
        .await?;

    Ok((StatusCode::OK, Json(detail.into_dto())))
}

/// Send a message to the assistant and get its reply.
///
/// Nothing is stored when the completion API fails. Only the 50 most recent
/// messages of a session are kept.
///
/// # Returns
/// - `200 OK` - Both stored messages and the updated session
/// - `400 Bad Request` - Empty or over-long message, or inactive session
/// - `502 Bad Gateway` - Completion API failed
/// - `503 Service Unavailable` - No completion API configured
#[utoipa::path(
    post,
    path = "/api/ai/sessions/{session_id}/messages",
    tag = AI_TAG,
    params(("session_id" = i32, Path, description = "Chat session ID")),
    request_body = SendMessageDto,
    responses(
        (status = 200, description = "Assistant replied", body = SendMessageResponseDto),
        (status = 400, description = "Invalid message or inactive session", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "Session not found", body = ErrorDto),
        (status = 429, description = "Rate limit exceeded"),
        (status = 502, description = "Completion API failed", body = ErrorDto),
        (status = 503, description = "AI assistant not configured", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn send_message(
    State(state): State<AppState>,
    token: AccessToken,
    Path(session_id): Path<i32>,
    Json(payload): Json<SendMessageDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let exchange = AiChatService::new(&state.db, state.ai.as_deref())
        .send_message(session_id, user.id, &payload.content)
        .await?;

    Ok((StatusCode::OK, Json(exchange.into_dto())))
}

/// Close a session. Closed sessions no longer appear in listings.
#[utoipa::path(
    delete,
    path = "/api/ai/sessions/{session_id}",
    tag = AI_TAG,
    params(("session_id" = i32, Path, description = "Chat session ID")),
    responses(
        (status = 204, description = "Session closed"),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "Session not found", body = ErrorDto),
        (status = 429, description = "Rate limit exceeded")
    ),
    security(("bearer" = [])),
)]
pub async fn delete_session(
    State(state): State<AppState>,
    token: AccessToken,
    Path(session_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    AiChatService::new(&state.db, state.ai.as_deref())
        .delete_session(session_id, user.id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// The caller's assistant usage, one row per course scope.
#[utoipa::path(
    get,
    path = "/api/ai/analytics",
    tag = AI_TAG,
    responses(
        (status = 200, description = "Usage analytics", body = Vec<AiAnalyticsDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 429, description = "Rate limit exceeded")
    ),
    security(("bearer" = [])),
)]
pub async fn get_analytics(
    State(state): State<AppState>,
    token: AccessToken,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let analytics = AiChatService::new(&state.db, state.ai.as_deref())
        .get_analytics(user.id)
        .await?;

    let dtos: Vec<AiAnalyticsDto> = analytics.into_iter().map(|a| a.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}
