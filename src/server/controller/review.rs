use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        course::{CreateReviewDto, ReviewDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AccessToken, AuthGuard},
        model::review::CreateReviewParams,
        service::review::ReviewService,
        state::AppState,
    },
};

/// Tag for grouping review endpoints in OpenAPI documentation
pub static REVIEW_TAG: &str = "review";

/// List a course's reviews, newest first.
#[utoipa::path(
    get,
    path = "/api/courses/{course_id}/reviews",
    tag = REVIEW_TAG,
    params(("course_id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Reviews of the course", body = Vec<ReviewDto>),
        (status = 404, description = "Course not found", body = ErrorDto)
    ),
)]
pub async fn get_reviews(
    State(state): State<AppState>,
    Path(course_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let reviews = ReviewService::new(&state.db)
        .get_by_course(course_id)
        .await?;

    let dtos: Vec<ReviewDto> = reviews.into_iter().map(|r| r.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Review a course the caller is enrolled in.
///
/// Each learner may review a course once; ratings run from 1 to 5.
///
/// # Returns
/// - `201 Created` - The new review
/// - `400 Bad Request` - Not enrolled, rating out of range or already reviewed
#[utoipa::path(
    post,
    path = "/api/courses/{course_id}/reviews",
    tag = REVIEW_TAG,
    params(("course_id" = i32, Path, description = "Course ID")),
    request_body = CreateReviewDto,
    responses(
        (status = 201, description = "Review created", body = ReviewDto),
        (status = 400, description = "Not enrolled, invalid rating or duplicate review", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "Course not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_review(
    State(state): State<AppState>,
    token: AccessToken,
    Path(course_id): Path<i32>,
    Json(payload): Json<CreateReviewDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let params = CreateReviewParams::from_dto(course_id, user.id, payload)?;
    let review = ReviewService::new(&state.db).create(&user, params).await?;

    Ok((StatusCode::CREATED, Json(review.into_dto())))
}

/// Delete a review.
///
/// # Access Control
/// - Review author or admin
#[utoipa::path(
    delete,
    path = "/api/courses/{course_id}/reviews/{review_id}",
    tag = REVIEW_TAG,
    params(
        ("course_id" = i32, Path, description = "Course ID"),
        ("review_id" = i32, Path, description = "Review ID")
    ),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is neither the author nor an admin", body = ErrorDto),
        (status = 404, description = "Review not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_review(
    State(state): State<AppState>,
    token: AccessToken,
    Path((course_id, review_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    ReviewService::new(&state.db)
        .delete(course_id, review_id, &user)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
