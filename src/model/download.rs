use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::api::LabelCountDto;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateDownloadDto {
    pub course_id: i32,
    pub resource_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DownloadDto {
    pub id: i32,
    pub user_id: i32,
    pub course_id: i32,
    pub resource_id: Option<i32>,
    pub resource_title: String,
    pub resource_type: String,
    pub resource_url: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub downloaded_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedDownloadsDto {
    pub downloads: Vec<DownloadDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResourceDownloadCountDto {
    pub resource_id: Option<i32>,
    pub title: String,
    pub count: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DownloadStatsDto {
    pub total: u64,
    pub by_type: Vec<LabelCountDto>,
    pub top_resources: Vec<ResourceDownloadCountDto>,
}
