//! Resource factory for creating test library resources.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test resources with customizable fields.
pub struct ResourceFactory<'a> {
    db: &'a DatabaseConnection,
    course_id: i32,
    uploaded_by: i32,
    lesson_id: Option<i32>,
    title: String,
    description: Option<String>,
    resource_type: String,
    url: String,
    tags: Vec<String>,
}

impl<'a> ResourceFactory<'a> {
    /// Creates a new course-level `pdf` resource factory with no tags.
    pub fn new(db: &'a DatabaseConnection, course_id: i32, uploaded_by: i32) -> Self {
        let id = next_id();
        Self {
            db,
            course_id,
            uploaded_by,
            lesson_id: None,
            title: format!("Resource {}", id),
            description: None,
            resource_type: "pdf".to_string(),
            url: format!("https://cdn.example.com/resources/{}.pdf", id),
            tags: Vec::new(),
        }
    }

    pub fn lesson_id(mut self, lesson_id: i32) -> Self {
        self.lesson_id = Some(lesson_id);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn resource_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_type = resource_type.into();
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Builds and inserts the resource entity into the database.
    pub async fn build(self) -> Result<entity::resource::Model, DbErr> {
        entity::resource::ActiveModel {
            course_id: ActiveValue::Set(self.course_id),
            lesson_id: ActiveValue::Set(self.lesson_id),
            title: ActiveValue::Set(self.title),
            description: ActiveValue::Set(self.description),
            resource_type: ActiveValue::Set(self.resource_type),
            url: ActiveValue::Set(self.url),
            tags: ActiveValue::Set(serde_json::json!(self.tags)),
            uploaded_by: ActiveValue::Set(self.uploaded_by),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a course-level `pdf` resource.
pub async fn create_resource(
    db: &DatabaseConnection,
    course_id: i32,
    uploaded_by: i32,
) -> Result<entity::resource::Model, DbErr> {
    ResourceFactory::new(db, course_id, uploaded_by).build().await
}
