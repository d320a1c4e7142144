use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        course::{
            CreateLessonDto, CreateSectionDto, LessonDto, SectionDto, UpdateLessonDto,
            UpdateSectionDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AccessToken, AuthGuard},
        model::curriculum::{CreateLessonParams, UpdateLessonParams, UpdateSectionParams},
        service::curriculum::CurriculumService,
        state::AppState,
        util::validate::require_text,
    },
};

/// Tag for grouping curriculum endpoints in OpenAPI documentation
pub static CURRICULUM_TAG: &str = "curriculum";

/// Append a section to a course.
///
/// Every curriculum endpoint is restricted to the course owner or an admin and
/// recomputes the course's lesson count and total duration.
///
/// # Returns
/// - `201 Created` - The created section, positioned last
/// - `400 Bad Request` - Empty title
/// - `403 Forbidden` - Caller does not manage the course
/// - `404 Not Found` - Course not found
#[utoipa::path(
    post,
    path = "/api/courses/{course_id}/sections",
    tag = CURRICULUM_TAG,
    params(("course_id" = i32, Path, description = "Course ID")),
    request_body = CreateSectionDto,
    responses(
        (status = 201, description = "Section created", body = SectionDto),
        (status = 400, description = "Invalid section data", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller does not manage the course", body = ErrorDto),
        (status = 404, description = "Course not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_section(
    State(state): State<AppState>,
    token: AccessToken,
    Path(course_id): Path<i32>,
    Json(payload): Json<CreateSectionDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let title = require_text("Title", &payload.title)?;
    let section = CurriculumService::new(&state.db)
        .create_section(course_id, &user, title)
        .await?;

    Ok((StatusCode::CREATED, Json(section.into_dto())))
}

/// Rename or reposition a section.
#[utoipa::path(
    put,
    path = "/api/courses/{course_id}/sections/{section_id}",
    tag = CURRICULUM_TAG,
    params(
        ("course_id" = i32, Path, description = "Course ID"),
        ("section_id" = i32, Path, description = "Section ID")
    ),
    request_body = UpdateSectionDto,
    responses(
        (status = 200, description = "Section updated", body = SectionDto),
        (status = 400, description = "Invalid section data", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller does not manage the course", body = ErrorDto),
        (status = 404, description = "Course or section not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_section(
    State(state): State<AppState>,
    token: AccessToken,
    Path((course_id, section_id)): Path<(i32, i32)>,
    Json(payload): Json<UpdateSectionDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let params = UpdateSectionParams::from_dto(payload)?;
    let section = CurriculumService::new(&state.db)
        .update_section(course_id, section_id, &user, params)
        .await?;

    Ok((StatusCode::OK, Json(section.into_dto())))
}

/// Delete a section along with its lessons and their resources.
#[utoipa::path(
    delete,
    path = "/api/courses/{course_id}/sections/{section_id}",
    tag = CURRICULUM_TAG,
    params(
        ("course_id" = i32, Path, description = "Course ID"),
        ("section_id" = i32, Path, description = "Section ID")
    ),
    responses(
        (status = 204, description = "Section deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller does not manage the course", body = ErrorDto),
        (status = 404, description = "Course or section not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_section(
    State(state): State<AppState>,
    token: AccessToken,
    Path((course_id, section_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    CurriculumService::new(&state.db)
        .delete_section(course_id, section_id, &user)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Append a lesson to a section.
///
/// Quiz questions need at least two options and a `correct_index` within range.
#[utoipa::path(
    post,
    path = "/api/courses/{course_id}/sections/{section_id}/lessons",
    tag = CURRICULUM_TAG,
    params(
        ("course_id" = i32, Path, description = "Course ID"),
        ("section_id" = i32, Path, description = "Section ID")
    ),
    request_body = CreateLessonDto,
    responses(
        (status = 201, description = "Lesson created", body = LessonDto),
        (status = 400, description = "Invalid lesson or quiz data", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller does not manage the course", body = ErrorDto),
        (status = 404, description = "Course or section not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_lesson(
    State(state): State<AppState>,
    token: AccessToken,
    Path((course_id, section_id)): Path<(i32, i32)>,
    Json(payload): Json<CreateLessonDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let params = CreateLessonParams::from_dto(payload)?;
    let lesson = CurriculumService::new(&state.db)
        .create_lesson(course_id, section_id, &user, params)
        .await?;

    Ok((StatusCode::CREATED, Json(lesson.into_dto(Vec::new()))))
}

/// Partially update a lesson.
#[utoipa::path(
    put,
    path = "/api/courses/{course_id}/sections/{section_id}/lessons/{lesson_id}",
    tag = CURRICULUM_TAG,
    params(
        ("course_id" = i32, Path, description = "Course ID"),
        ("section_id" = i32, Path, description = "Section ID"),
        ("lesson_id" = i32, Path, description = "Lesson ID")
    ),
    request_body = UpdateLessonDto,
    responses(
        (status = 200, description = "Lesson updated", body = LessonDto),
        (status = 400, description = "Invalid lesson or quiz data", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller does not manage the course", body = ErrorDto),
        (status = 404, description = "Course, section or lesson not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_lesson(
    State(state): State<AppState>,
    token: AccessToken,
    Path((course_id, section_id, lesson_id)): Path<(i32, i32, i32)>,
    Json(payload): Json<UpdateLessonDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let params = UpdateLessonParams::from_dto(payload)?;
    let lesson = CurriculumService::new(&state.db)
        .update_lesson(course_id, section_id, lesson_id, &user, params)
        .await?;

    Ok((StatusCode::OK, Json(lesson.into_dto(Vec::new()))))
}

/// Delete a lesson and the resources attached to it.
#[utoipa::path(
    delete,
    path = "/api/courses/{course_id}/sections/{section_id}/lessons/{lesson_id}",
    tag = CURRICULUM_TAG,
    params(
        ("course_id" = i32, Path, description = "Course ID"),
        ("section_id" = i32, Path, description = "Section ID"),
        ("lesson_id" = i32, Path, description = "Lesson ID")
    ),
    responses(
        (status = 204, description = "Lesson deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller does not manage the course", body = ErrorDto),
        (status = 404, description = "Course, section or lesson not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_lesson(
    State(state): State<AppState>,
    token: AccessToken,
    Path((course_id, section_id, lesson_id)): Path<(i32, i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    CurriculumService::new(&state.db)
        .delete_lesson(course_id, section_id, lesson_id, &user)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
