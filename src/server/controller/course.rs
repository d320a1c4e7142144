use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    model::{
        api::{default_entries, ErrorDto, MAX_ENTRIES},
        course::{
            CourseDetailDto, CourseDto, CreateCourseDto, EnrolledCourseDto, PaginatedCoursesDto,
            PublishCourseDto, UpdateCourseDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AccessToken, AuthGuard, Permission},
        model::course::{CourseFilter, CreateCourseParams, UpdateCourseParams},
        service::{course::CourseService, enrollment::EnrollmentService},
        state::AppState,
    },
};

/// Tag for grouping course endpoints in OpenAPI documentation
pub static COURSE_TAG: &str = "course";

#[derive(Deserialize)]
pub struct CourseListParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
    pub category: Option<String>,
    pub level: Option<String>,
    pub search: Option<String>,
}

impl CourseListParams {
    fn filter(&self) -> CourseFilter {
        let non_empty = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        CourseFilter {
            category: non_empty(&self.category),
            level: non_empty(&self.level).map(|l| l.to_lowercase()),
            search: non_empty(&self.search),
        }
    }
}

/// Browse the published course catalog.
///
/// Public endpoint. Results are newest first and can be narrowed by category,
/// level and a free-text search over title and description.
///
/// # Returns
/// - `200 OK` - Paginated list of published courses
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/courses",
    tag = COURSE_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)"),
        ("category" = Option<String>, Query, description = "Exact category"),
        ("level" = Option<String>, Query, description = "beginner, intermediate or advanced"),
        ("search" = Option<String>, Query, description = "Substring of title or description")
    ),
    responses(
        (status = 200, description = "Successfully retrieved courses", body = PaginatedCoursesDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_courses(
    State(state): State<AppState>,
    Query(params): Query<CourseListParams>,
) -> Result<impl IntoResponse, AppError> {
    let per_page = params.entries.clamp(1, MAX_ENTRIES);
    let courses = CourseService::new(&state.db)
        .get_published(params.filter(), params.page, per_page)
        .await?;

    Ok((StatusCode::OK, Json(courses.into_dto())))
}

/// List the courses owned by the caller, published or not.
///
/// # Access Control
/// - `Instructor` - Instructors and admins
#[utoipa::path(
    get,
    path = "/api/courses/mine",
    tag = COURSE_TAG,
    responses(
        (status = 200, description = "Owned courses", body = Vec<CourseDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller cannot teach", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_my_courses(
    State(state): State<AppState>,
    token: AccessToken,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Instructor])
        .await?;

    let courses = CourseService::new(&state.db)
        .get_by_instructor(user.id)
        .await?;

    let dtos: Vec<CourseDto> = courses.into_iter().map(|c| c.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// List the caller's enrollments together with course summaries.
#[utoipa::path(
    get,
    path = "/api/courses/enrolled",
    tag = COURSE_TAG,
    responses(
        (status = 200, description = "Enrolled courses", body = Vec<EnrolledCourseDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_enrolled_courses(
    State(state): State<AppState>,
    token: AccessToken,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let enrolled = EnrollmentService::new(&state.db)
        .get_enrolled(user.id)
        .await?;

    let dtos: Vec<EnrolledCourseDto> = enrolled.into_iter().map(|e| e.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Create a new, unpublished course owned by the caller.
///
/// # Access Control
/// - `Instructor` - Instructors and admins
///
/// # Returns
/// - `201 Created` - The created course
/// - `400 Bad Request` - Missing title, description or category, unknown level or negative price
#[utoipa::path(
    post,
    path = "/api/courses",
    tag = COURSE_TAG,
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created", body = CourseDto),
        (status = 400, description = "Invalid course data", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller cannot teach", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_course(
    State(state): State<AppState>,
    token: AccessToken,
    Json(payload): Json<CreateCourseDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Instructor])
        .await?;

    let params = CreateCourseParams::from_dto(user.id, payload)?;
    let course = CourseService::new(&state.db).create(params).await?;

    Ok((StatusCode::CREATED, Json(course.into_dto())))
}

/// Get a course with its full curriculum.
///
/// Public for published courses. Unpublished courses are only visible to their
/// owner or an admin and answer 404 to everyone else. The token is optional.
#[utoipa::path(
    get,
    path = "/api/courses/{course_id}",
    tag = COURSE_TAG,
    params(("course_id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course with sections, lessons and resources", body = CourseDetailDto),
        (status = 404, description = "Course not found", body = ErrorDto)
    ),
)]
pub async fn get_course(
    State(state): State<AppState>,
    token: AccessToken,
    Path(course_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let viewer = AuthGuard::new(&state.db, &state.jwt, &token)
        .optional()
        .await?;

    let detail = CourseService::new(&state.db)
        .get_detail(course_id, viewer.as_ref())
        .await?;

    Ok((StatusCode::OK, Json(detail.into_dto())))
}

/// Partially update a course.
///
/// # Access Control
/// - Course owner or admin
#[utoipa::path(
    put,
    path = "/api/courses/{course_id}",
    tag = COURSE_TAG,
    params(("course_id" = i32, Path, description = "Course ID")),
    request_body = UpdateCourseDto,
    responses(
        (status = 200, description = "Course updated", body = CourseDto),
        (status = 400, description = "Invalid course data", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller does not manage the course", body = ErrorDto),
        (status = 404, description = "Course not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_course(
    State(state): State<AppState>,
    token: AccessToken,
    Path(course_id): Path<i32>,
    Json(payload): Json<UpdateCourseDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let params = UpdateCourseParams::from_dto(payload)?;
    let course = CourseService::new(&state.db)
        .update(course_id, &user, params)
        .await?;

    Ok((StatusCode::OK, Json(course.into_dto())))
}

/// Delete a course with its curriculum, enrollments, reviews, resources and
/// download records.
///
/// # Access Control
/// - Course owner or admin
#[utoipa::path(
    delete,
    path = "/api/courses/{course_id}",
    tag = COURSE_TAG,
    params(("course_id" = i32, Path, description = "Course ID")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller does not manage the course", body = ErrorDto),
        (status = 404, description = "Course not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_course(
    State(state): State<AppState>,
    token: AccessToken,
    Path(course_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    CourseService::new(&state.db)
        .delete(course_id, &user)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Publish or unpublish a course.
///
/// A course needs at least one lesson before it can be published.
#[utoipa::path(
    put,
    path = "/api/courses/{course_id}/publish",
    tag = COURSE_TAG,
    params(("course_id" = i32, Path, description = "Course ID")),
    request_body = PublishCourseDto,
    responses(
        (status = 200, description = "Publication state updated", body = CourseDto),
        (status = 400, description = "Course has no lessons", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller does not manage the course", body = ErrorDto),
        (status = 404, description = "Course not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn publish_course(
    State(state): State<AppState>,
    token: AccessToken,
    Path(course_id): Path<i32>,
    Json(payload): Json<PublishCourseDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let course = CourseService::new(&state.db)
        .set_published(course_id, &user, payload.is_published)
        .await?;

    Ok((StatusCode::OK, Json(course.into_dto())))
}
