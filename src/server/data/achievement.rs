//! User achievement repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::achievement::{Achievement, AchievementKind};

pub struct AchievementRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AchievementRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Awards an achievement unless the user already holds the same kind for the
    /// same course.
    ///
    /// # Returns
    /// - `Ok(Some(Achievement))` - Newly awarded achievement
    /// - `Ok(None)` - Already held
    /// - `Err(DbErr)` - Database error
    pub async fn award(
        &self,
        user_id: i32,
        kind: AchievementKind,
        course_id: Option<i32>,
    ) -> Result<Option<Achievement>, DbErr> {
        let mut existing = entity::prelude::UserAchievement::find()
            .filter(entity::user_achievement::Column::UserId.eq(user_id))
            .filter(entity::user_achievement::Column::Kind.eq(kind.as_str()));
        existing = match course_id {
            Some(course_id) => {
                existing.filter(entity::user_achievement::Column::CourseId.eq(course_id))
            }
            None => existing.filter(entity::user_achievement::Column::CourseId.is_null()),
        };
        if existing.count(self.db).await? > 0 {
            return Ok(None);
        }

        let entity = entity::user_achievement::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            kind: ActiveValue::Set(kind.as_str().to_string()),
            title: ActiveValue::Set(kind.title().to_string()),
            description: ActiveValue::Set(kind.description().to_string()),
            course_id: ActiveValue::Set(course_id),
            earned_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Some(Achievement::from_entity(entity)))
    }

    /// Gets a user's achievements, most recent first.
    pub async fn get_by_user(&self, user_id: i32) -> Result<Vec<Achievement>, DbErr> {
        let entities = entity::prelude::UserAchievement::find()
            .filter(entity::user_achievement::Column::UserId.eq(user_id))
            .order_by_desc(entity::user_achievement::Column::EarnedAt)
            .order_by_desc(entity::user_achievement::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Achievement::from_entity).collect())
    }

    pub async fn delete_by_user(&self, user_id: i32) -> Result<(), DbErr> {
        entity::prelude::UserAchievement::delete_many()
            .filter(entity::user_achievement::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(())
    }
}
