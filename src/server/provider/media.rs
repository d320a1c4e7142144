//! Asset host client for uploaded media.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use url::Url;

use crate::{
    model::media::MediaAssetDto,
    server::error::{config::ConfigError, provider::ProviderError},
};

/// File received from a client, ready to be forwarded.
#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
    pub folder: Option<String>,
}

/// Asset as stored by the host.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MediaAsset {
    pub url: String,
    pub public_id: String,
    pub resource_type: String,
    #[serde(default)]
    pub format: Option<String>,
    pub bytes: u64,
}

impl MediaAsset {
    pub fn into_dto(self) -> MediaAssetDto {
        MediaAssetDto {
            url: self.url,
            public_id: self.public_id,
            resource_type: self.resource_type,
            format: self.format,
            bytes: self.bytes,
        }
    }
}

#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn upload(&self, upload: MediaUpload) -> Result<MediaAsset, ProviderError>;

    async fn delete(&self, public_id: &str) -> Result<(), ProviderError>;
}

/// HTTP client for the asset host API.
///
/// `POST {base}/upload` takes a multipart form (`file`, optional `folder`) and
/// answers with the asset JSON; `DELETE {base}/assets/{public_id}` removes it.
pub struct MediaHostClient {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl MediaHostClient {
    pub fn new(client: reqwest::Client, base_url: &str, api_key: String) -> Result<Self, ConfigError> {
        let base_url = Url::parse(base_url)
            .ok()
            .filter(|u| !u.cannot_be_a_base())
            .ok_or_else(|| ConfigError::InvalidEnvVar {
                name: "MEDIA_HOST_URL".to_string(),
                value: base_url.to_string(),
            })?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ProviderError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ProviderError::Upstream("Media host URL cannot hold a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let detail = response.text().await.unwrap_or_default();
    Err(ProviderError::Upstream(format!(
        "Media host returned {}: {}",
        status, detail
    )))
}

#[async_trait]
impl MediaStore for MediaHostClient {
    async fn upload(&self, upload: MediaUpload) -> Result<MediaAsset, ProviderError> {
        let part = Part::bytes(upload.data)
            .file_name(upload.file_name)
            .mime_str(&upload.content_type)?;
        let mut form = Form::new().part("file", part);
        if let Some(folder) = upload.folder {
            form = form.text("folder", folder);
        }

        let response = self
            .client
            .post(self.endpoint(&["upload"])?)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        let asset = ensure_success(response).await?.json::<MediaAsset>().await?;
        tracing::debug!("Uploaded media asset {}", asset.public_id);

        Ok(asset)
    }

    async fn delete(&self, public_id: &str) -> Result<(), ProviderError> {
        let response = self
            .client
            .delete(self.endpoint(&["assets", public_id])?)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        ensure_success(response).await?;
        Ok(())
    }
}
