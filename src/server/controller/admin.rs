use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    model::{
        api::{default_entries, ErrorDto, PaginationParams},
        dashboard::PlatformAnalyticsDto,
        user::{PaginatedUsersDto, UpdateRoleDto, UpdateStatusDto, UserDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AccessToken, AuthGuard, Permission},
        model::user::{Role, UserFilter},
        service::{dashboard::DashboardService, user::UserService},
        state::AppState,
    },
};

/// Tag for grouping admin endpoints in OpenAPI documentation
pub static ADMIN_TAG: &str = "admin";

#[derive(Deserialize)]
pub struct UserListParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
    pub role: Option<String>,
    pub search: Option<String>,
}

impl UserListParams {
    fn into_filter(self) -> Result<(UserFilter, PaginationParams), AppError> {
        let role = match self.role.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(value) => Some(
                Role::parse(value)
                    .ok_or_else(|| AppError::BadRequest(format!("Unknown role '{}'", value)))?,
            ),
        };
        let search = self
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok((
            UserFilter { role, search },
            PaginationParams {
                page: self.page,
                entries: self.entries,
            },
        ))
    }
}

fn user_not_found(user_id: i32) -> AppError {
    AppError::NotFound(format!("User {} not found", user_id))
}

/// Get paginated users.
///
/// Lists every account ordered by id. `role` restricts the listing to one role and
/// `search` matches name or email case-insensitively.
///
/// # Access Control
/// - `Admin` - Only admins can list users
///
/// # Returns
/// - `200 OK` - Paginated list of users
/// - `400 Bad Request` - Unknown role filter
/// - `401 Unauthorized` - Missing or invalid token
/// - `403 Forbidden` - Caller is not an admin
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = ADMIN_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)"),
        ("role" = Option<String>, Query, description = "Filter by role: learner, instructor or admin"),
        ("search" = Option<String>, Query, description = "Substring of name or email")
    ),
    responses(
        (status = 200, description = "Successfully retrieved users", body = PaginatedUsersDto),
        (status = 400, description = "Invalid filter", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_users(
    State(state): State<AppState>,
    token: AccessToken,
    Query(params): Query<UserListParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    let (filter, pagination) = params.into_filter()?;
    let users = UserService::new(&state.db)
        .get_paginated(filter, pagination.page, pagination.per_page())
        .await?;

    Ok((StatusCode::OK, Json(users.into_dto())))
}

/// Get a single user by id.
#[utoipa::path(
    get,
    path = "/api/admin/users/{user_id}",
    tag = ADMIN_TAG,
    params(("user_id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_user(
    State(state): State<AppState>,
    token: AccessToken,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    let user = UserService::new(&state.db)
        .get_by_id(user_id)
        .await?
        .ok_or_else(|| user_not_found(user_id))?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Change a user's role.
///
/// Admins cannot change their own role.
///
/// # Returns
/// - `200 OK` - Updated user
/// - `400 Bad Request` - Unknown role or the caller targeted themself
/// - `404 Not Found` - User does not exist
#[utoipa::path(
    put,
    path = "/api/admin/users/{user_id}/role",
    tag = ADMIN_TAG,
    params(("user_id" = i32, Path, description = "User ID")),
    request_body = UpdateRoleDto,
    responses(
        (status = 200, description = "Role updated", body = UserDto),
        (status = 400, description = "Invalid role or own account", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_user_role(
    State(state): State<AppState>,
    token: AccessToken,
    Path(user_id): Path<i32>,
    Json(payload): Json<UpdateRoleDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    let role = Role::parse(payload.role.trim())
        .ok_or_else(|| AppError::BadRequest(format!("Unknown role '{}'", payload.role)))?;

    let user = UserService::new(&state.db)
        .set_role(admin.id, user_id, role)
        .await?
        .ok_or_else(|| user_not_found(user_id))?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Enable or disable a user account.
///
/// Disabled accounts keep their data but every authenticated request fails with
/// 403. Admins cannot disable themselves.
#[utoipa::path(
    put,
    path = "/api/admin/users/{user_id}/status",
    tag = ADMIN_TAG,
    params(("user_id" = i32, Path, description = "User ID")),
    request_body = UpdateStatusDto,
    responses(
        (status = 200, description = "Status updated", body = UserDto),
        (status = 400, description = "Caller targeted their own account", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_user_status(
    State(state): State<AppState>,
    token: AccessToken,
    Path(user_id): Path<i32>,
    Json(payload): Json<UpdateStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    let user = UserService::new(&state.db)
        .set_active(admin.id, user_id, payload.is_active)
        .await?
        .ok_or_else(|| user_not_found(user_id))?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Delete a user account and everything it owns.
///
/// Users who still own courses cannot be deleted; reassign or delete the courses
/// first.
///
/// # Returns
/// - `204 No Content` - User deleted
/// - `400 Bad Request` - Own account or the user owns courses
/// - `404 Not Found` - User does not exist
#[utoipa::path(
    delete,
    path = "/api/admin/users/{user_id}",
    tag = ADMIN_TAG,
    params(("user_id" = i32, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Own account or user owns courses", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_user(
    State(state): State<AppState>,
    token: AccessToken,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    let deleted = UserService::new(&state.db)
        .delete(admin.id, user_id)
        .await?;

    if !deleted {
        return Err(user_not_found(user_id));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Platform-wide analytics.
///
/// Users by role, signups for the last six months, courses per category, the ten
/// most enrolled courses and downloads by resource type.
#[utoipa::path(
    get,
    path = "/api/admin/analytics",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Platform analytics", body = PlatformAnalyticsDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is not an admin", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_analytics(
    State(state): State<AppState>,
    token: AccessToken,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    let analytics = DashboardService::new(&state.db).platform_analytics().await?;

    Ok((StatusCode::OK, Json(analytics)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(role: Option<&str>, search: Option<&str>) -> UserListParams {
        UserListParams {
            page: 2,
            entries: 500,
            role: role.map(str::to_string),
            search: search.map(str::to_string),
        }
    }

    #[test]
    fn parses_role_and_trims_search() {
        let (filter, pagination) = params(Some("instructor"), Some("  ada ")).into_filter().unwrap();

        assert_eq!(filter.role, Some(Role::Instructor));
        assert_eq!(filter.search.as_deref(), Some("ada"));
        assert_eq!(pagination.page, 2);
        assert_eq!(pagination.per_page(), 100);
    }

    #[test]
    fn blank_filters_are_ignored() {
        let (filter, _) = params(Some(""), Some("   ")).into_filter().unwrap();

        assert!(filter.role.is_none());
        assert!(filter.search.is_none());
    }

    #[test]
    fn unknown_role_is_rejected() {
        let result = params(Some("owner"), None).into_filter();

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
