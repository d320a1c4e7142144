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
        resource::{
            CreateResourceDto, PaginatedResourcesDto, ResourceDto, TagCountDto, UpdateResourceDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AccessToken, AuthGuard},
        model::resource::{
            CreateResourceParams, ResourceSearch, ResourceType, UpdateResourceParams,
        },
        service::resource::ResourceService,
        state::AppState,
    },
};

/// Tag for grouping resource library endpoints in OpenAPI documentation
pub static RESOURCE_TAG: &str = "resource";

#[derive(Deserialize)]
pub struct LibrarySearchParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
    pub q: Option<String>,
    pub tag: Option<String>,
    #[serde(rename = "type")]
    pub resource_type: Option<String>,
    pub course_id: Option<i32>,
}

impl LibrarySearchParams {
    fn search(&self) -> Result<ResourceSearch, AppError> {
        let lowered = |value: &Option<String>| {
            value
                .as_deref()
                .map(|v| v.trim().to_lowercase())
                .filter(|v| !v.is_empty())
        };

        let resource_type = match lowered(&self.resource_type) {
            Some(value) => Some(ResourceType::parse(&value)?),
            None => None,
        };

        Ok(ResourceSearch {
            query: lowered(&self.q),
            tag: lowered(&self.tag),
            resource_type,
            course_id: self.course_id,
        })
    }
}

/// List every resource attached to a course or its lessons.
///
/// # Access Control
/// - Course owner, admin or an enrolled learner
#[utoipa::path(
    get,
    path = "/api/courses/{course_id}/resources",
    tag = RESOURCE_TAG,
    params(("course_id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Resources of the course", body = Vec<ResourceDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller has no access to the course", body = ErrorDto),
        (status = 404, description = "Course not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_course_resources(
    State(state): State<AppState>,
    token: AccessToken,
    Path(course_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let resources = ResourceService::new(&state.db)
        .get_by_course(course_id, &user)
        .await?;

    let dtos: Vec<ResourceDto> = resources.into_iter().map(|r| r.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Attach a resource to a course, optionally to one of its lessons.
///
/// Tags are trimmed, lowercased and de-duplicated. The URL must be absolute.
///
/// # Access Control
/// - Course owner or admin
///
/// # Returns
/// - `201 Created` - The new resource
/// - `400 Bad Request` - Invalid fields or the lesson belongs to another course
#[utoipa::path(
    post,
    path = "/api/courses/{course_id}/resources",
    tag = RESOURCE_TAG,
    params(("course_id" = i32, Path, description = "Course ID")),
    request_body = CreateResourceDto,
    responses(
        (status = 201, description = "Resource created", body = ResourceDto),
        (status = 400, description = "Invalid resource data", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller does not manage the course", body = ErrorDto),
        (status = 404, description = "Course not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_resource(
    State(state): State<AppState>,
    token: AccessToken,
    Path(course_id): Path<i32>,
    Json(payload): Json<CreateResourceDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let params = CreateResourceParams::from_dto(course_id, user.id, payload)?;
    let resource = ResourceService::new(&state.db).create(&user, params).await?;

    Ok((StatusCode::CREATED, Json(resource.into_dto())))
}

/// Partially update a resource.
#[utoipa::path(
    put,
    path = "/api/courses/{course_id}/resources/{resource_id}",
    tag = RESOURCE_TAG,
    params(
        ("course_id" = i32, Path, description = "Course ID"),
        ("resource_id" = i32, Path, description = "Resource ID")
    ),
    request_body = UpdateResourceDto,
    responses(
        (status = 200, description = "Resource updated", body = ResourceDto),
        (status = 400, description = "Invalid resource data", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller does not manage the course", body = ErrorDto),
        (status = 404, description = "Course or resource not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_resource(
    State(state): State<AppState>,
    token: AccessToken,
    Path((course_id, resource_id)): Path<(i32, i32)>,
    Json(payload): Json<UpdateResourceDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let params = UpdateResourceParams::from_dto(payload)?;
    let resource = ResourceService::new(&state.db)
        .update(course_id, resource_id, &user, params)
        .await?;

    Ok((StatusCode::OK, Json(resource.into_dto())))
}

/// Delete a resource.
#[utoipa::path(
    delete,
    path = "/api/courses/{course_id}/resources/{resource_id}",
    tag = RESOURCE_TAG,
    params(
        ("course_id" = i32, Path, description = "Course ID"),
        ("resource_id" = i32, Path, description = "Resource ID")
    ),
    responses(
        (status = 204, description = "Resource deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller does not manage the course", body = ErrorDto),
        (status = 404, description = "Course or resource not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_resource(
    State(state): State<AppState>,
    token: AccessToken,
    Path((course_id, resource_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    ResourceService::new(&state.db)
        .delete(course_id, resource_id, &user)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Search the resource library.
///
/// Covers resources of published courses only. `q` matches title, description or
/// any tag; `tag` and `type` must match exactly. Results are newest first.
#[utoipa::path(
    get,
    path = "/api/resources",
    tag = RESOURCE_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)"),
        ("q" = Option<String>, Query, description = "Free-text query"),
        ("tag" = Option<String>, Query, description = "Required tag"),
        ("type" = Option<String>, Query, description = "Resource type"),
        ("course_id" = Option<i32>, Query, description = "Restrict to one course")
    ),
    responses(
        (status = 200, description = "Matching resources", body = PaginatedResourcesDto),
        (status = 400, description = "Unknown resource type", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn search_resources(
    State(state): State<AppState>,
    token: AccessToken,
    Query(params): Query<LibrarySearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let search = params.search()?;
    let per_page = params.entries.clamp(1, MAX_ENTRIES);
    let resources = ResourceService::new(&state.db)
        .search(search, params.page, per_page)
        .await?;

    Ok((StatusCode::OK, Json(resources.into_dto())))
}

/// Tag usage counts across published courses, most used first.
#[utoipa::path(
    get,
    path = "/api/resources/tags",
    tag = RESOURCE_TAG,
    responses(
        (status = 200, description = "Tag usage counts", body = Vec<TagCountDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_tags(
    State(state): State<AppState>,
    token: AccessToken,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let tags = ResourceService::new(&state.db).get_tag_counts().await?;
    let dtos: Vec<TagCountDto> = tags.into_iter().map(|t| t.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}
