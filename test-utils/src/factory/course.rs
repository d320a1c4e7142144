//! Course factory for creating test course entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test courses with customizable fields.
pub struct CourseFactory<'a> {
    db: &'a DatabaseConnection,
    instructor_id: i32,
    title: String,
    description: String,
    category: String,
    level: String,
    price: f64,
    is_published: bool,
    total_duration: i32,
    total_lessons: i32,
}

impl<'a> CourseFactory<'a> {
    /// Creates a new CourseFactory with default values.
    ///
    /// Defaults: title `"Course {id}"`, category `"programming"`, level
    /// `"beginner"`, price `0.0`, unpublished, empty totals.
    pub fn new(db: &'a DatabaseConnection, instructor_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            instructor_id,
            title: format!("Course {}", id),
            description: format!("Description for course {}", id),
            category: "programming".to_string(),
            level: "beginner".to_string(),
            price: 0.0,
            is_published: false,
            total_duration: 0,
            total_lessons: 0,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn published(mut self, is_published: bool) -> Self {
        self.is_published = is_published;
        self
    }

    pub fn total_duration(mut self, minutes: i32) -> Self {
        self.total_duration = minutes;
        self
    }

    pub fn total_lessons(mut self, count: i32) -> Self {
        self.total_lessons = count;
        self
    }

    /// Builds and inserts the course entity into the database.
    pub async fn build(self) -> Result<entity::course::Model, DbErr> {
        let now = Utc::now();
        entity::course::ActiveModel {
            title: ActiveValue::Set(self.title),
            description: ActiveValue::Set(self.description),
            category: ActiveValue::Set(self.category),
            level: ActiveValue::Set(self.level),
            price: ActiveValue::Set(self.price),
            instructor_id: ActiveValue::Set(self.instructor_id),
            is_published: ActiveValue::Set(self.is_published),
            total_duration: ActiveValue::Set(self.total_duration),
            total_lessons: ActiveValue::Set(self.total_lessons),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an unpublished course owned by `instructor_id`.
pub async fn create_course(
    db: &DatabaseConnection,
    instructor_id: i32,
) -> Result<entity::course::Model, DbErr> {
    CourseFactory::new(db, instructor_id).build().await
}

/// Creates a published course owned by `instructor_id`.
pub async fn create_published_course(
    db: &DatabaseConnection,
    instructor_id: i32,
) -> Result<entity::course::Model, DbErr> {
    CourseFactory::new(db, instructor_id)
        .published(true)
        .build()
        .await
}
