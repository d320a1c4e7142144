//! Lesson factory for creating test lesson entities.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test lessons with customizable fields.
pub struct LessonFactory<'a> {
    db: &'a DatabaseConnection,
    course_id: i32,
    section_id: i32,
    title: String,
    duration: i32,
    position: i32,
    quiz: Option<serde_json::Value>,
}

impl<'a> LessonFactory<'a> {
    /// Creates a new LessonFactory with a 10 minute duration at position 0.
    pub fn new(db: &'a DatabaseConnection, course_id: i32, section_id: i32) -> Self {
        Self {
            db,
            course_id,
            section_id,
            title: format!("Lesson {}", next_id()),
            duration: 10,
            position: 0,
            quiz: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn duration(mut self, minutes: i32) -> Self {
        self.duration = minutes;
        self
    }

    pub fn position(mut self, position: i32) -> Self {
        self.position = position;
        self
    }

    pub fn quiz(mut self, quiz: serde_json::Value) -> Self {
        self.quiz = Some(quiz);
        self
    }

    /// Builds and inserts the lesson entity into the database.
    pub async fn build(self) -> Result<entity::lesson::Model, DbErr> {
        entity::lesson::ActiveModel {
            course_id: ActiveValue::Set(self.course_id),
            section_id: ActiveValue::Set(self.section_id),
            title: ActiveValue::Set(self.title),
            duration: ActiveValue::Set(self.duration),
            position: ActiveValue::Set(self.position),
            quiz: ActiveValue::Set(self.quiz),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a 10 minute lesson at position 0.
pub async fn create_lesson(
    db: &DatabaseConnection,
    course_id: i32,
    section_id: i32,
) -> Result<entity::lesson::Model, DbErr> {
    LessonFactory::new(db, course_id, section_id).build().await
}
