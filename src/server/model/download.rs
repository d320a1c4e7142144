use chrono::{DateTime, Utc};

use crate::model::download::{DownloadDto, PaginatedDownloadsDto, ResourceDownloadCountDto};

/// Immutable audit record of a resource download.
///
/// Resource title, type and URL are copied at download time so the record
/// survives later edits or deletion of the resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Download {
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

impl Download {
    pub fn from_entity(entity: entity::resource_download::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            course_id: entity.course_id,
            resource_id: entity.resource_id,
            resource_title: entity.resource_title,
            resource_type: entity.resource_type,
            resource_url: entity.resource_url,
            ip_address: entity.ip_address,
            user_agent: entity.user_agent,
            downloaded_at: entity.downloaded_at,
        }
    }

    pub fn into_dto(self) -> DownloadDto {
        DownloadDto {
            id: self.id,
            user_id: self.user_id,
            course_id: self.course_id,
            resource_id: self.resource_id,
            resource_title: self.resource_title,
            resource_type: self.resource_type,
            resource_url: self.resource_url,
            ip_address: self.ip_address,
            user_agent: self.user_agent,
            downloaded_at: self.downloaded_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PaginatedDownloads {
    pub downloads: Vec<Download>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedDownloads {
    pub fn into_dto(self) -> PaginatedDownloadsDto {
        PaginatedDownloadsDto {
            downloads: self.downloads.into_iter().map(Download::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

/// Number of downloads recorded for one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDownloadCount {
    /// `None` groups records whose resource was deleted.
    pub resource_id: Option<i32>,
    pub title: String,
    pub count: u64,
}

impl ResourceDownloadCount {
    pub fn into_dto(self) -> ResourceDownloadCountDto {
        ResourceDownloadCountDto {
            resource_id: self.resource_id,
            title: self.title,
            count: self.count,
        }
    }
}

/// Request metadata captured alongside a download.
#[derive(Debug, Clone, Default)]
pub struct ClientInfo {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RecordDownloadParams {
    pub user_id: i32,
    pub course_id: i32,
    pub resource_id: i32,
    pub client: ClientInfo,
}
