use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{
        api::ErrorDto,
        dashboard::{AdminDashboardDto, InstructorDashboardDto, LearnerDashboardDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AccessToken, AuthGuard, Permission},
        service::dashboard::DashboardService,
        state::AppState,
    },
};

/// Tag for grouping dashboard endpoints in OpenAPI documentation
pub static DASHBOARD_TAG: &str = "dashboard";

/// Learning summary for the caller.
#[utoipa::path(
    get,
    path = "/api/dashboard/learner",
    tag = DASHBOARD_TAG,
    responses(
        (status = 200, description = "Learner dashboard", body = LearnerDashboardDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_learner_dashboard(
    State(state): State<AppState>,
    token: AccessToken,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let dashboard = DashboardService::new(&state.db).learner(user.id).await?;

    Ok((StatusCode::OK, Json(dashboard)))
}

/// Teaching summary for the caller's courses.
///
/// # Access Control
/// - `Instructor` - Instructors and admins
#[utoipa::path(
    get,
    path = "/api/dashboard/instructor",
    tag = DASHBOARD_TAG,
    responses(
        (status = 200, description = "Instructor dashboard", body = InstructorDashboardDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller cannot teach", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_instructor_dashboard(
    State(state): State<AppState>,
    token: AccessToken,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Instructor])
        .await?;

    let dashboard = DashboardService::new(&state.db).instructor(user.id).await?;

    Ok((StatusCode::OK, Json(dashboard)))
}

/// Platform overview for administrators.
///
/// # Access Control
/// - `Admin` - Only admins
#[utoipa::path(
    get,
    path = "/api/dashboard/admin",
    tag = DASHBOARD_TAG,
    responses(
        (status = 200, description = "Admin dashboard", body = AdminDashboardDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is not an admin", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_admin_dashboard(
    State(state): State<AppState>,
    token: AccessToken,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    let dashboard = DashboardService::new(&state.db).admin().await?;

    Ok((StatusCode::OK, Json(dashboard)))
}
