use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, PaginationParams},
        download::{CreateDownloadDto, DownloadDto, DownloadStatsDto, PaginatedDownloadsDto},
    },
    server::{
        error::AppError,
        middleware::{
            auth::{AccessToken, AuthGuard, Permission},
            client::RequestClient,
        },
        model::download::RecordDownloadParams,
        service::download::DownloadService,
        state::AppState,
    },
};

/// Tag for grouping download endpoints in OpenAPI documentation
pub static DOWNLOAD_TAG: &str = "download";

/// Record a resource download and return the resource URL.
///
/// The caller's address and user agent are stored with the record. Records are
/// append-only.
///
/// # Access Control
/// - Enrolled learner, course owner or admin
///
/// # Returns
/// - `201 Created` - The download record including the resource URL
/// - `403 Forbidden` - Caller has no access to the course
/// - `404 Not Found` - Course not found or the resource belongs to another course
#[utoipa::path(
    post,
    path = "/api/resource-downloads",
    tag = DOWNLOAD_TAG,
    request_body = CreateDownloadDto,
    responses(
        (status = 201, description = "Download recorded", body = DownloadDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller has no access to the course", body = ErrorDto),
        (status = 404, description = "Course or resource not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn record_download(
    State(state): State<AppState>,
    token: AccessToken,
    RequestClient(client): RequestClient,
    Json(payload): Json<CreateDownloadDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let params = RecordDownloadParams {
        user_id: user.id,
        course_id: payload.course_id,
        resource_id: payload.resource_id,
        client,
    };
    let download = DownloadService::new(&state.db)
        .record(&user, params)
        .await?;

    Ok((StatusCode::CREATED, Json(download.into_dto())))
}

/// The caller's download history, newest first.
#[utoipa::path(
    get,
    path = "/api/resource-downloads/mine",
    tag = DOWNLOAD_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)")
    ),
    responses(
        (status = 200, description = "Download history", body = PaginatedDownloadsDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_my_downloads(
    State(state): State<AppState>,
    token: AccessToken,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let downloads = DownloadService::new(&state.db)
        .get_by_user(user.id, params.page, params.per_page())
        .await?;

    Ok((StatusCode::OK, Json(downloads.into_dto())))
}

/// Download records for a course.
///
/// # Access Control
/// - Course owner or admin
#[utoipa::path(
    get,
    path = "/api/resource-downloads/course/{course_id}",
    tag = DOWNLOAD_TAG,
    params(("course_id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Download records of the course", body = Vec<DownloadDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller does not manage the course", body = ErrorDto),
        (status = 404, description = "Course not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_course_downloads(
    State(state): State<AppState>,
    token: AccessToken,
    Path(course_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let downloads = DownloadService::new(&state.db)
        .get_by_course(course_id, &user)
        .await?;

    let dtos: Vec<DownloadDto> = downloads.into_iter().map(|d| d.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Platform download statistics.
///
/// Total downloads, downloads per resource type and the ten most downloaded
/// resources.
///
/// # Access Control
/// - `Admin` - Only admins can view download statistics
#[utoipa::path(
    get,
    path = "/api/resource-downloads/stats",
    tag = DOWNLOAD_TAG,
    responses(
        (status = 200, description = "Download statistics", body = DownloadStatsDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is not an admin", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_download_stats(
    State(state): State<AppState>,
    token: AccessToken,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    let stats = DownloadService::new(&state.db).get_stats().await?;

    Ok((StatusCode::OK, Json(stats)))
}
