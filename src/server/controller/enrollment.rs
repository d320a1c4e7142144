use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        course::{EnrollmentDto, LearnerDto, UpdateProgressDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AccessToken, AuthGuard},
        service::enrollment::EnrollmentService,
        state::AppState,
    },
};

/// Tag for grouping enrollment endpoints in OpenAPI documentation
pub static ENROLLMENT_TAG: &str = "enrollment";

/// Enroll the caller in a published course.
///
/// The first enrollment of an account earns the `first_enrollment` achievement.
///
/// # Returns
/// - `201 Created` - The new enrollment
/// - `400 Bad Request` - Course unpublished, caller owns it or is already enrolled
/// - `404 Not Found` - Course not found
#[utoipa::path(
    post,
    path = "/api/courses/{course_id}/enroll",
    tag = ENROLLMENT_TAG,
    params(("course_id" = i32, Path, description = "Course ID")),
    responses(
        (status = 201, description = "Enrolled", body = EnrollmentDto),
        (status = 400, description = "Course unpublished, owned by caller or already enrolled", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "Course not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn enroll(
    State(state): State<AppState>,
    token: AccessToken,
    Path(course_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let enrollment = EnrollmentService::new(&state.db)
        .enroll(user.id, course_id)
        .await?;

    Ok((StatusCode::CREATED, Json(enrollment.into_dto())))
}

/// Leave a course.
#[utoipa::path(
    delete,
    path = "/api/courses/{course_id}/enroll",
    tag = ENROLLMENT_TAG,
    params(("course_id" = i32, Path, description = "Course ID")),
    responses(
        (status = 204, description = "Unenrolled"),
        (status = 400, description = "Not enrolled", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn unenroll(
    State(state): State<AppState>,
    token: AccessToken,
    Path(course_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    EnrollmentService::new(&state.db)
        .unenroll(user.id, course_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Record the caller's progress through a course.
///
/// Reaching 100 completes the enrollment and awards `course_completed`; the fifth
/// completed course also awards `five_courses_completed`.
///
/// # Returns
/// - `200 OK` - Updated enrollment
/// - `400 Bad Request` - Progress outside 0-100 or caller not enrolled
#[utoipa::path(
    put,
    path = "/api/courses/{course_id}/progress",
    tag = ENROLLMENT_TAG,
    params(("course_id" = i32, Path, description = "Course ID")),
    request_body = UpdateProgressDto,
    responses(
        (status = 200, description = "Progress updated", body = EnrollmentDto),
        (status = 400, description = "Invalid progress or not enrolled", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_progress(
    State(state): State<AppState>,
    token: AccessToken,
    Path(course_id): Path<i32>,
    Json(payload): Json<UpdateProgressDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let update = EnrollmentService::new(&state.db)
        .update_progress(user.id, course_id, payload.progress)
        .await?;

    Ok((StatusCode::OK, Json(update.enrollment.into_dto())))
}

/// List the learners of a course with their progress.
///
/// # Access Control
/// - Course owner or admin
#[utoipa::path(
    get,
    path = "/api/courses/{course_id}/learners",
    tag = ENROLLMENT_TAG,
    params(("course_id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Learners of the course", body = Vec<LearnerDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller does not manage the course", body = ErrorDto),
        (status = 404, description = "Course not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_learners(
    State(state): State<AppState>,
    token: AccessToken,
    Path(course_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let learners = EnrollmentService::new(&state.db)
        .get_learners(course_id, &user)
        .await?;

    let dtos: Vec<LearnerDto> = learners.into_iter().map(|l| l.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}
