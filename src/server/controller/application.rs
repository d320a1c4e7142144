use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    model::{
        api::ErrorDto,
        application::{ApplicationDto, CreateApplicationDto, RejectApplicationDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AccessToken, AuthGuard, Permission},
        model::{application::SubmitApplicationParams, user::ApplicationStatus},
        service::application::ApplicationService,
        state::AppState,
    },
};

/// Tag for grouping instructor application endpoints in OpenAPI documentation
pub static APPLICATION_TAG: &str = "instructor-application";

#[derive(Deserialize)]
pub struct ApplicationListParams {
    pub status: Option<String>,
}

impl ApplicationListParams {
    fn status(&self) -> Result<ApplicationStatus, AppError> {
        match self.status.as_deref().map(str::trim) {
            None | Some("") => Ok(ApplicationStatus::Pending),
            Some(value) => ApplicationStatus::parse(value).ok_or_else(|| {
                AppError::BadRequest(format!("Unknown application status '{}'", value))
            }),
        }
    }
}

/// Apply to become an instructor.
///
/// Only learners without a previous application may apply.
///
/// # Returns
/// - `201 Created` - The pending application
/// - `400 Bad Request` - Not a learner, empty motivation, already pending or already reviewed
#[utoipa::path(
    post,
    path = "/api/instructor-applications",
    tag = APPLICATION_TAG,
    request_body = CreateApplicationDto,
    responses(
        (status = 201, description = "Application submitted", body = ApplicationDto),
        (status = 400, description = "Application not allowed or invalid", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn submit_application(
    State(state): State<AppState>,
    token: AccessToken,
    Json(payload): Json<CreateApplicationDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let params = SubmitApplicationParams::from_dto(user.id, payload)?;
    let application = ApplicationService::new(&state.db).submit(params).await?;

    Ok((StatusCode::CREATED, Json(application.into_dto())))
}

/// The caller's own application state.
#[utoipa::path(
    get,
    path = "/api/instructor-applications/mine",
    tag = APPLICATION_TAG,
    responses(
        (status = 200, description = "Caller's application", body = ApplicationDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_my_application(
    State(state): State<AppState>,
    token: AccessToken,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let application = ApplicationService::new(&state.db).get_mine(user.id).await?;

    Ok((StatusCode::OK, Json(application.into_dto())))
}

/// List applications in one state, `pending` by default.
///
/// # Access Control
/// - `Admin` - Only admins can review applications
#[utoipa::path(
    get,
    path = "/api/instructor-applications",
    tag = APPLICATION_TAG,
    params(
        ("status" = Option<String>, Query, description = "none, pending, approved or rejected (default: pending)")
    ),
    responses(
        (status = 200, description = "Applications in the requested state", body = Vec<ApplicationDto>),
        (status = 400, description = "Unknown status", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is not an admin", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_applications(
    State(state): State<AppState>,
    token: AccessToken,
    Query(params): Query<ApplicationListParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    let applications = ApplicationService::new(&state.db)
        .get_by_status(params.status()?)
        .await?;

    let dtos: Vec<ApplicationDto> = applications.into_iter().map(|a| a.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Approve a pending application and promote the applicant to instructor.
#[utoipa::path(
    put,
    path = "/api/instructor-applications/{user_id}/approve",
    tag = APPLICATION_TAG,
    params(("user_id" = i32, Path, description = "Applicant user ID")),
    responses(
        (status = 200, description = "Application approved", body = ApplicationDto),
        (status = 400, description = "Application is not pending", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn approve_application(
    State(state): State<AppState>,
    token: AccessToken,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    let application = ApplicationService::new(&state.db)
        .approve(user_id, admin.id)
        .await?;

    Ok((StatusCode::OK, Json(application.into_dto())))
}

/// Reject a pending application. The applicant keeps their role.
#[utoipa::path(
    put,
    path = "/api/instructor-applications/{user_id}/reject",
    tag = APPLICATION_TAG,
    params(("user_id" = i32, Path, description = "Applicant user ID")),
    request_body = RejectApplicationDto,
    responses(
        (status = 200, description = "Application rejected", body = ApplicationDto),
        (status = 400, description = "Application is not pending", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn reject_application(
    State(state): State<AppState>,
    token: AccessToken,
    Path(user_id): Path<i32>,
    Json(payload): Json<RejectApplicationDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    let reason = payload
        .reason
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty());

    let application = ApplicationService::new(&state.db)
        .reject(user_id, admin.id, reason)
        .await?;

    Ok((StatusCode::OK, Json(application.into_dto())))
}
