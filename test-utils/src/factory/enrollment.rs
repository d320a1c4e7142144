//! Enrollment factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating enrollments with customizable progress.
pub struct EnrollmentFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    course_id: i32,
    progress: i32,
}

impl<'a> EnrollmentFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, user_id: i32, course_id: i32) -> Self {
        Self {
            db,
            user_id,
            course_id,
            progress: 0,
        }
    }

    /// Sets progress; 100 also marks the enrollment completed.
    pub fn progress(mut self, progress: i32) -> Self {
        self.progress = progress;
        self
    }

    pub async fn build(self) -> Result<entity::enrollment::Model, DbErr> {
        let now = Utc::now();
        let completed = self.progress >= 100;
        entity::enrollment::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            course_id: ActiveValue::Set(self.course_id),
            progress: ActiveValue::Set(self.progress),
            completed: ActiveValue::Set(completed),
            enrolled_at: ActiveValue::Set(now),
            completed_at: ActiveValue::Set(completed.then_some(now)),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Enrolls `user_id` in `course_id` with zero progress.
pub async fn create_enrollment(
    db: &DatabaseConnection,
    user_id: i32,
    course_id: i32,
) -> Result<entity::enrollment::Model, DbErr> {
    EnrollmentFactory::new(db, user_id, course_id).build().await
}
