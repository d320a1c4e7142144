use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{api::ErrorDto, media::MediaAssetDto, user::UserDto},
    server::{
        error::AppError,
        middleware::auth::{AccessToken, AuthGuard, Permission},
        provider::media::MediaUpload,
        service::media::MediaService,
        state::AppState,
    },
};

/// Tag for grouping media endpoints in OpenAPI documentation
pub static MEDIA_TAG: &str = "media";

const DEFAULT_FILE_NAME: &str = "upload";
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Reads the `file` part and optional `folder` field of a multipart upload.
async fn read_upload(mut multipart: Multipart) -> Result<MediaUpload, AppError> {
    let mut file = None;
    let mut folder = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        match field.name() {
            Some("file") => {
                let file_name = field
                    .file_name()
                    .unwrap_or(DEFAULT_FILE_NAME)
                    .to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or(DEFAULT_CONTENT_TYPE)
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read file: {}", e)))?;

                file = Some((file_name, content_type, data.to_vec()));
            }
            Some("folder") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid folder: {}", e)))?;
                folder = Some(value.trim().to_string()).filter(|f| !f.is_empty());
            }
            _ => {}
        }
    }

    let Some((file_name, content_type, data)) = file else {
        return Err(AppError::BadRequest("A file is required".to_string()));
    };

    Ok(MediaUpload {
        file_name,
        content_type,
        data,
        folder,
    })
}

/// Upload a file to the asset host.
///
/// Accepts images, video, audio, PDF, Office documents and plain text up to the
/// configured size limit.
///
/// # Access Control
/// - `Instructor` - Instructors and admins
///
/// # Returns
/// - `201 Created` - Stored asset
/// - `400 Bad Request` - Missing, empty, oversized or unsupported file
/// - `502 Bad Gateway` - Asset host failed
/// - `503 Service Unavailable` - Asset host not configured
#[utoipa::path(
    post,
    path = "/api/media/upload",
    tag = MEDIA_TAG,
    request_body(content_type = "multipart/form-data", description = "`file` part and optional `folder` field"),
    responses(
        (status = 201, description = "File uploaded", body = MediaAssetDto),
        (status = 400, description = "Invalid file", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller cannot teach", body = ErrorDto),
        (status = 502, description = "Asset host failed", body = ErrorDto),
        (status = 503, description = "Asset host not configured", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn upload_media(
    State(state): State<AppState>,
    token: AccessToken,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Instructor])
        .await?;

    let upload = read_upload(multipart).await?;
    let asset = MediaService::new(&state.db, state.media.as_deref(), state.media_max_upload_bytes)
        .upload(upload)
        .await?;

    Ok((StatusCode::CREATED, Json(asset.into_dto())))
}

/// Upload an image and make it the caller's avatar.
#[utoipa::path(
    post,
    path = "/api/media/avatar",
    tag = MEDIA_TAG,
    request_body(content_type = "multipart/form-data", description = "`file` part holding an image"),
    responses(
        (status = 200, description = "Avatar updated", body = UserDto),
        (status = 400, description = "Missing file or not an image", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 502, description = "Asset host failed", body = ErrorDto),
        (status = 503, description = "Asset host not configured", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn upload_avatar(
    State(state): State<AppState>,
    token: AccessToken,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let upload = read_upload(multipart).await?;
    let updated = MediaService::new(&state.db, state.media.as_deref(), state.media_max_upload_bytes)
        .upload_avatar(user.id, upload)
        .await?;

    Ok((StatusCode::OK, Json(updated.into_dto())))
}

/// Delete an asset from the host.
///
/// The identifier may contain folder segments, e.g. `avatars/abc123`.
#[utoipa::path(
    delete,
    path = "/api/media/{public_id}",
    tag = MEDIA_TAG,
    params(("public_id" = String, Path, description = "Asset identifier on the host")),
    responses(
        (status = 204, description = "Asset deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller cannot teach", body = ErrorDto),
        (status = 502, description = "Asset host failed", body = ErrorDto),
        (status = 503, description = "Asset host not configured", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_media(
    State(state): State<AppState>,
    token: AccessToken,
    Path(public_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Instructor])
        .await?;

    MediaService::new(&state.db, state.media.as_deref(), state.media_max_upload_bytes)
        .delete(&public_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
