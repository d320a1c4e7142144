//! Enrollment repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use std::collections::HashMap;

use crate::server::model::{enrollment::Enrollment, row_count};

pub struct EnrollmentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> EnrollmentRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, user_id: i32, course_id: i32) -> Result<Enrollment, DbErr> {
        let entity = entity::enrollment::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            course_id: ActiveValue::Set(course_id),
            progress: ActiveValue::Set(0),
            completed: ActiveValue::Set(false),
            enrolled_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Enrollment::from_entity(entity))
    }

    /// Finds a user's enrollment in a course.
    pub async fn find(&self, user_id: i32, course_id: i32) -> Result<Option<Enrollment>, DbErr> {
        let entity = entity::prelude::Enrollment::find()
            .filter(entity::enrollment::Column::UserId.eq(user_id))
            .filter(entity::enrollment::Column::CourseId.eq(course_id))
            .one(self.db)
            .await?;

        Ok(entity.map(Enrollment::from_entity))
    }

    pub async fn is_enrolled(&self, user_id: i32, course_id: i32) -> Result<bool, DbErr> {
        Ok(self.find(user_id, course_id).await?.is_some())
    }

    /// Gets a user's enrollments, most recent first.
    pub async fn get_by_user(&self, user_id: i32) -> Result<Vec<Enrollment>, DbErr> {
        let entities = entity::prelude::Enrollment::find()
            .filter(entity::enrollment::Column::UserId.eq(user_id))
            .order_by_desc(entity::enrollment::Column::EnrolledAt)
            .order_by_desc(entity::enrollment::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Enrollment::from_entity).collect())
    }

    /// Gets enrollments of a course, earliest first.
    pub async fn get_by_course(&self, course_id: i32) -> Result<Vec<Enrollment>, DbErr> {
        let entities = entity::prelude::Enrollment::find()
            .filter(entity::enrollment::Column::CourseId.eq(course_id))
            .order_by_asc(entity::enrollment::Column::EnrolledAt)
            .order_by_asc(entity::enrollment::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Enrollment::from_entity).collect())
    }

    /// Enrollment count per course for the given courses. Courses without
    /// enrollments are absent.
    pub async fn count_by_courses(&self, course_ids: Vec<i32>) -> Result<HashMap<i32, u64>, DbErr> {
        if course_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(i32, i64)> = entity::prelude::Enrollment::find()
            .select_only()
            .column(entity::enrollment::Column::CourseId)
            .column_as(entity::enrollment::Column::Id.count(), "enrollments")
            .filter(entity::enrollment::Column::CourseId.is_in(course_ids))
            .group_by(entity::enrollment::Column::CourseId)
            .into_tuple()
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(course_id, count)| (course_id, row_count(count)))
            .collect())
    }

    /// `(course_id, enrollments)` of the most enrolled courses, ties broken by
    /// course id. Courses without enrollments never appear.
    pub async fn most_enrolled(&self, limit: u64) -> Result<Vec<(i32, u64)>, DbErr> {
        let rows: Vec<(i32, i64)> = entity::prelude::Enrollment::find()
            .select_only()
            .column(entity::enrollment::Column::CourseId)
            .column_as(entity::enrollment::Column::Id.count(), "enrollments")
            .group_by(entity::enrollment::Column::CourseId)
            .order_by_desc(entity::enrollment::Column::Id.count())
            .order_by_asc(entity::enrollment::Column::CourseId)
            .limit(limit)
            .into_tuple()
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(course_id, count)| (course_id, row_count(count)))
            .collect())
    }

    /// Writes new progress, setting `completed_at` the first time progress reaches 100.
    pub async fn update_progress(
        &self,
        enrollment_id: i32,
        progress: i32,
    ) -> Result<Option<Enrollment>, DbErr> {
        let Some(model) = entity::prelude::Enrollment::find_by_id(enrollment_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let now = Utc::now();
        let first_completion = progress >= 100 && model.completed_at.is_none();
        let mut active = model.into_active_model();
        active.progress = ActiveValue::Set(progress);
        active.last_accessed_at = ActiveValue::Set(Some(now));
        if progress >= 100 {
            active.completed = ActiveValue::Set(true);
        }
        if first_completion {
            active.completed_at = ActiveValue::Set(Some(now));
        }

        let updated = active.update(self.db).await?;
        Ok(Some(Enrollment::from_entity(updated)))
    }

    pub async fn delete(&self, enrollment_id: i32) -> Result<(), DbErr> {
        entity::prelude::Enrollment::delete_by_id(enrollment_id)
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn delete_by_course(&self, course_id: i32) -> Result<(), DbErr> {
        entity::prelude::Enrollment::delete_many()
            .filter(entity::enrollment::Column::CourseId.eq(course_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn delete_by_user(&self, user_id: i32) -> Result<(), DbErr> {
        entity::prelude::Enrollment::delete_many()
            .filter(entity::enrollment::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn count_by_course(&self, course_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Enrollment::find()
            .filter(entity::enrollment::Column::CourseId.eq(course_id))
            .count(self.db)
            .await
    }

    pub async fn count_completed_by_user(&self, user_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Enrollment::find()
            .filter(entity::enrollment::Column::UserId.eq(user_id))
            .filter(entity::enrollment::Column::Completed.eq(true))
            .count(self.db)
            .await
    }

    pub async fn count_all(&self) -> Result<u64, DbErr> {
        entity::prelude::Enrollment::find().count(self.db).await
    }

    pub async fn count_completed(&self) -> Result<u64, DbErr> {
        entity::prelude::Enrollment::find()
            .filter(entity::enrollment::Column::Completed.eq(true))
            .count(self.db)
            .await
    }
}
