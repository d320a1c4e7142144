//! Resource download record factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Records a download of `resource` by `user_id`.
pub async fn create_download(
    db: &DatabaseConnection,
    user_id: i32,
    resource: &entity::resource::Model,
) -> Result<entity::resource_download::Model, DbErr> {
    entity::resource_download::ActiveModel {
        user_id: ActiveValue::Set(user_id),
        course_id: ActiveValue::Set(resource.course_id),
        resource_id: ActiveValue::Set(Some(resource.id)),
        resource_title: ActiveValue::Set(resource.title.clone()),
        resource_type: ActiveValue::Set(resource.resource_type.clone()),
        resource_url: ActiveValue::Set(resource.url.clone()),
        downloaded_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}
