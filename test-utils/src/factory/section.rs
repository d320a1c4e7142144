//! Course section factory.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a section at `position` in the given course.
pub async fn create_section(
    db: &DatabaseConnection,
    course_id: i32,
    position: i32,
) -> Result<entity::course_section::Model, DbErr> {
    entity::course_section::ActiveModel {
        course_id: ActiveValue::Set(course_id),
        title: ActiveValue::Set(format!("Section {}", next_id())),
        position: ActiveValue::Set(position),
        ..Default::default()
    }
    .insert(db)
    .await
}
