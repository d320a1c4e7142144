//! Course review factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a review with the given rating and a short comment.
pub async fn create_review(
    db: &DatabaseConnection,
    course_id: i32,
    user_id: i32,
    rating: i32,
) -> Result<entity::course_review::Model, DbErr> {
    let now = Utc::now();
    entity::course_review::ActiveModel {
        course_id: ActiveValue::Set(course_id),
        user_id: ActiveValue::Set(user_id),
        rating: ActiveValue::Set(rating),
        comment: ActiveValue::Set(Some(format!("Rated {} stars", rating))),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
}
