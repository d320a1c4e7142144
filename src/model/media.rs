use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// An asset stored on the media host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MediaAssetDto {
    pub url: String,
    pub public_id: String,
    pub resource_type: String,
    pub format: Option<String>,
    pub bytes: u64,
}
