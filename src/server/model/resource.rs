//! Learning resource models and library search parameters.

use chrono::{DateTime, Utc};

use crate::{
    model::resource::{
        CreateResourceDto, PaginatedResourcesDto, ResourceDto, TagCountDto, UpdateResourceDto,
    },
    server::{
        error::AppError,
        util::validate::{normalize_tags, require_text, validate_url},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    Pdf,
    Video,
    Document,
    Link,
    Image,
    Other,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Pdf => "pdf",
            ResourceType::Video => "video",
            ResourceType::Document => "document",
            ResourceType::Link => "link",
            ResourceType::Image => "image",
            ResourceType::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value.trim().to_lowercase().as_str() {
            "pdf" => Ok(ResourceType::Pdf),
            "video" => Ok(ResourceType::Video),
            "document" => Ok(ResourceType::Document),
            "link" => Ok(ResourceType::Link),
            "image" => Ok(ResourceType::Image),
            "other" => Ok(ResourceType::Other),
            other => Err(AppError::BadRequest(format!(
                "Invalid resource type: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
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

impl Resource {
    pub fn from_entity(entity: entity::resource::Model) -> Self {
        let tags = serde_json::from_value(entity.tags).unwrap_or_default();

        Self {
            id: entity.id,
            course_id: entity.course_id,
            lesson_id: entity.lesson_id,
            title: entity.title,
            description: entity.description,
            resource_type: entity.resource_type,
            url: entity.url,
            file_size: entity.file_size,
            tags,
            uploaded_by: entity.uploaded_by,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> ResourceDto {
        ResourceDto {
            id: self.id,
            course_id: self.course_id,
            lesson_id: self.lesson_id,
            title: self.title,
            description: self.description,
            resource_type: self.resource_type,
            url: self.url,
            file_size: self.file_size,
            tags: self.tags,
            uploaded_by: self.uploaded_by,
            created_at: self.created_at,
        }
    }

    /// Case-insensitive match of `needle` (already lowercase) against title,
    /// description or any tag.
    pub fn matches_text(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
            || self.tags.iter().any(|t| t.contains(needle))
    }
}

#[derive(Debug, Clone)]
pub struct PaginatedResources {
    pub resources: Vec<Resource>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedResources {
    pub fn into_dto(self) -> PaginatedResourcesDto {
        PaginatedResourcesDto {
            resources: self.resources.into_iter().map(Resource::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

/// Library search filters; every present filter must match.
#[derive(Debug, Clone, Default)]
pub struct ResourceSearch {
    /// Lowercased free-text query.
    pub query: Option<String>,
    /// Lowercased tag that must be present.
    pub tag: Option<String>,
    pub resource_type: Option<ResourceType>,
    pub course_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TagCount {
    pub tag: String,
    pub count: u64,
}

impl TagCount {
    pub fn into_dto(self) -> TagCountDto {
        TagCountDto {
            tag: self.tag,
            count: self.count,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateResourceParams {
    pub course_id: i32,
    pub uploaded_by: i32,
    pub lesson_id: Option<i32>,
    pub title: String,
    pub description: Option<String>,
    pub resource_type: ResourceType,
    pub url: String,
    pub file_size: Option<i64>,
    pub tags: Vec<String>,
}

impl CreateResourceParams {
    pub fn from_dto(
        course_id: i32,
        uploaded_by: i32,
        dto: CreateResourceDto,
    ) -> Result<Self, AppError> {
        Ok(Self {
            course_id,
            uploaded_by,
            lesson_id: dto.lesson_id,
            title: require_text("Title", &dto.title)?,
            description: dto.description,
            resource_type: ResourceType::parse(&dto.resource_type)?,
            url: validate_url(&dto.url)?,
            file_size: validate_file_size(dto.file_size)?,
            tags: normalize_tags(dto.tags.unwrap_or_default()),
        })
    }
}

/// Partial resource update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateResourceParams {
    pub lesson_id: Option<i32>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub resource_type: Option<ResourceType>,
    pub url: Option<String>,
    pub file_size: Option<i64>,
    pub tags: Option<Vec<String>>,
}

impl UpdateResourceParams {
    pub fn from_dto(dto: UpdateResourceDto) -> Result<Self, AppError> {
        Ok(Self {
            lesson_id: dto.lesson_id,
            title: dto.title.map(|t| require_text("Title", &t)).transpose()?,
            description: dto.description,
            resource_type: dto
                .resource_type
                .as_deref()
                .map(ResourceType::parse)
                .transpose()?,
            url: dto.url.map(|u| validate_url(&u)).transpose()?,
            file_size: validate_file_size(dto.file_size)?,
            tags: dto.tags.map(normalize_tags),
        })
    }
}

fn validate_file_size(file_size: Option<i64>) -> Result<Option<i64>, AppError> {
    if file_size.is_some_and(|s| s < 0) {
        return Err(AppError::BadRequest(
            "File size must be zero or greater".to_string(),
        ));
    }
    Ok(file_size)
}
