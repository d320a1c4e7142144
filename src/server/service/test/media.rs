use async_trait::async_trait;

use super::*;
use crate::server::{
    error::provider::ProviderError,
    provider::media::{MediaAsset, MediaStore, MediaUpload},
    service::media::MediaService,
};

/// Store stub echoing the upload back as an asset.
struct StubStore;

#[async_trait]
impl MediaStore for StubStore {
    async fn upload(&self, upload: MediaUpload) -> Result<MediaAsset, ProviderError> {
        let folder = upload.folder.unwrap_or_else(|| "uploads".to_string());
        Ok(MediaAsset {
            url: format!("https://cdn.example.com/{}/{}", folder, upload.file_name),
            public_id: format!("{}/{}", folder, upload.file_name),
            resource_type: "image".to_string(),
            format: Some("png".to_string()),
            bytes: upload.data.len() as u64,
        })
    }

    async fn delete(&self, _public_id: &str) -> Result<(), ProviderError> {
        Ok(())
    }
}

fn upload(content_type: &str, data: Vec<u8>) -> MediaUpload {
    MediaUpload {
        file_name: "photo.png".to_string(),
        content_type: content_type.to_string(),
        data,
        folder: None,
    }
}

/// Tests upload validation.
///
/// Expected: empty, oversized and unsupported files rejected before reaching the store
#[tokio::test]
async fn upload_validates_file() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let store = StubStore;
    let service = MediaService::new(db, Some(&store), 8);

    assert!(matches!(
        service.upload(upload("image/png", Vec::new())).await,
        Err(AppError::BadRequest(_))
    ));
    assert!(matches!(
        service.upload(upload("image/png", vec![0; 9])).await,
        Err(AppError::BadRequest(_))
    ));
    assert!(matches!(
        service.upload(upload("application/x-sh", vec![0; 4])).await,
        Err(AppError::BadRequest(_))
    ));

    let asset = service.upload(upload("image/png", vec![0; 4])).await?;
    assert_eq!(asset.bytes, 4);

    Ok(())
}

/// Tests that avatar uploads land in the avatar folder and update the profile.
///
/// Expected: user avatar_url set to the uploaded asset URL
#[tokio::test]
async fn avatar_upload_updates_profile() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::user::create_learner(db).await?;
    let store = StubStore;
    let service = MediaService::new(db, Some(&store), 1024);

    let updated = service
        .upload_avatar(user.id, upload("image/png", vec![1, 2, 3]))
        .await?;

    assert_eq!(
        updated.avatar_url.as_deref(),
        Some("https://cdn.example.com/avatars/photo.png")
    );

    let not_image = service
        .upload_avatar(user.id, upload("application/pdf", vec![1]))
        .await;
    assert!(matches!(not_image, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests that an unconfigured store yields a not configured error.
///
/// Expected: ProviderErr(NotConfigured)
#[tokio::test]
async fn missing_store_is_not_configured() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let service = MediaService::new(db, None, 1024);

    let result = service.upload(upload("image/png", vec![1])).await;

    assert!(matches!(
        result,
        Err(AppError::ProviderErr(ProviderError::NotConfigured(_)))
    ));

    Ok(())
}
