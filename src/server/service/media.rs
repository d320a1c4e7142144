//! Uploads forwarded to the external asset host.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{provider::ProviderError, AppError},
    model::user::{UpdateProfileParams, User},
    provider::media::{MediaAsset, MediaStore, MediaUpload},
};

const AVATAR_FOLDER: &str = "avatars";
const MEDIA_HOST: &str = "Media storage";

const DOCUMENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-powerpoint",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    "text/plain",
];

/// Whether uploads of this content type are accepted.
pub fn is_allowed_content_type(content_type: &str) -> bool {
    let content_type = content_type.to_lowercase();
    let essence = content_type.split(';').next().unwrap_or_default().trim();

    ["image/", "video/", "audio/"]
        .iter()
        .any(|prefix| essence.starts_with(prefix))
        || DOCUMENT_TYPES.contains(&essence)
}

pub struct MediaService<'a> {
    db: &'a DatabaseConnection,
    store: Option<&'a dyn MediaStore>,
    max_bytes: u64,
}

impl<'a> MediaService<'a> {
    /// Creates the service. `store` is `None` when no asset host is configured,
    /// in which case every operation fails with 503.
    pub fn new(
        db: &'a DatabaseConnection,
        store: Option<&'a dyn MediaStore>,
        max_bytes: u64,
    ) -> Self {
        Self {
            db,
            store,
            max_bytes,
        }
    }

    /// Validates and forwards a file to the asset host.
    ///
    /// # Returns
    /// - `Ok(MediaAsset)` - Stored asset
    /// - `Err(AppError::BadRequest)` - Empty, oversized or unsupported file
    /// - `Err(AppError::ProviderErr)` - Host not configured (503) or failed (502)
    pub async fn upload(&self, upload: MediaUpload) -> Result<MediaAsset, AppError> {
        self.validate(&upload)?;
        let store = self.store()?;

        let asset = store.upload(upload).await?;

        tracing::info!("Uploaded media asset {} ({} bytes)", asset.public_id, asset.bytes);

        Ok(asset)
    }

    /// Uploads an image and makes it the user's avatar.
    pub async fn upload_avatar(&self, user_id: i32, upload: MediaUpload) -> Result<User, AppError> {
        if !upload.content_type.to_lowercase().starts_with("image/") {
            return Err(AppError::BadRequest("Avatar must be an image".to_string()));
        }

        let asset = self
            .upload(MediaUpload {
                folder: Some(AVATAR_FOLDER.to_string()),
                ..upload
            })
            .await?;

        UserRepository::new(self.db)
            .update_profile(
                user_id,
                UpdateProfileParams {
                    avatar_url: Some(asset.url),
                    ..Default::default()
                },
            )
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    pub async fn delete(&self, public_id: &str) -> Result<(), AppError> {
        let public_id = public_id.trim();
        if public_id.is_empty() {
            return Err(AppError::BadRequest("Asset id is required".to_string()));
        }

        self.store()?.delete(public_id).await?;

        tracing::info!("Deleted media asset {}", public_id);

        Ok(())
    }

    fn store(&self) -> Result<&'a dyn MediaStore, AppError> {
        self.store
            .ok_or_else(|| ProviderError::NotConfigured(MEDIA_HOST).into())
    }

    fn validate(&self, upload: &MediaUpload) -> Result<(), AppError> {
        if upload.data.is_empty() {
            return Err(AppError::BadRequest("File is empty".to_string()));
        }
        if upload.data.len() as u64 > self.max_bytes {
            return Err(AppError::BadRequest(format!(
                "File exceeds the maximum size of {} bytes",
                self.max_bytes
            )));
        }
        if !is_allowed_content_type(&upload.content_type) {
            return Err(AppError::BadRequest(format!(
                "Unsupported file type '{}'",
                upload.content_type
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_media_and_documents() {
        assert!(is_allowed_content_type("image/png"));
        assert!(is_allowed_content_type("video/mp4"));
        assert!(is_allowed_content_type("audio/mpeg"));
        assert!(is_allowed_content_type("application/pdf"));
        assert!(is_allowed_content_type("text/plain; charset=utf-8"));
        assert!(is_allowed_content_type(
            "application/vnd.openxmlformats-officedocument.presentationml.presentation"
        ));
    }

    #[test]
    fn rejects_other_types() {
        assert!(!is_allowed_content_type("application/x-msdownload"));
        assert!(!is_allowed_content_type("text/html"));
        assert!(!is_allowed_content_type(""));
    }
}
