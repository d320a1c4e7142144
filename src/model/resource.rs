use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ResourceDto {
    pub id: i32,
    pub course_id: i32,
    pub lesson_id: Option<i32>,
    pub title: String,
    pub description: Option<String>,
    pub resource_type: String,
    pub url: String,
    pub file_size: Option<i64>,
    pub tags: Vec<String>,
    pub uploaded_by: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateResourceDto {
    pub title: String,
    pub description: Option<String>,
    pub resource_type: String,
    pub url: String,
    pub file_size: Option<i64>,
    pub tags: Option<Vec<String>>,
    pub lesson_id: Option<i32>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateResourceDto {
    pub title: Option<String>,
    pub description: Option<String>,
    pub resource_type: Option<String>,
    pub url: Option<String>,
    pub file_size: Option<i64>,
    pub tags: Option<Vec<String>>,
    pub lesson_id: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResourcesDto {
    pub resources: Vec<ResourceDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TagCountDto {
    pub tag: String,
    pub count: u64,
}
