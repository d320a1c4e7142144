//! Course review repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use std::collections::HashMap;

use crate::server::model::{
    row_count,
    review::{CreateReviewParams, RatingSummary, RatingTotals, Review},
};

pub struct ReviewRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ReviewRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        params: CreateReviewParams,
        user_name: String,
    ) -> Result<Review, DbErr> {
        let now = Utc::now();
        let entity = entity::course_review::ActiveModel {
            course_id: ActiveValue::Set(params.course_id),
            user_id: ActiveValue::Set(params.user_id),
            rating: ActiveValue::Set(params.rating),
            comment: ActiveValue::Set(params.comment),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Review::from_entity(entity, user_name))
    }

    /// Finds a review row without resolving the author's name.
    pub async fn find_by_id(
        &self,
        review_id: i32,
    ) -> Result<Option<entity::course_review::Model>, DbErr> {
        entity::prelude::CourseReview::find_by_id(review_id)
            .one(self.db)
            .await
    }

    pub async fn exists(&self, user_id: i32, course_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::CourseReview::find()
            .filter(entity::course_review::Column::UserId.eq(user_id))
            .filter(entity::course_review::Column::CourseId.eq(course_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Gets a course's reviews with author names, newest first.
    ///
    /// Authors that no longer exist are shown as "Deleted user".
    pub async fn get_by_course(&self, course_id: i32) -> Result<Vec<Review>, DbErr> {
        let reviews = entity::prelude::CourseReview::find()
            .filter(entity::course_review::Column::CourseId.eq(course_id))
            .order_by_desc(entity::course_review::Column::CreatedAt)
            .order_by_desc(entity::course_review::Column::Id)
            .all(self.db)
            .await?;

        let user_ids: Vec<i32> = reviews.iter().map(|r| r.user_id).collect();
        let names: HashMap<i32, String> = if user_ids.is_empty() {
            HashMap::new()
        } else {
            entity::prelude::User::find()
                .filter(entity::user::Column::Id.is_in(user_ids))
                .all(self.db)
                .await?
                .into_iter()
                .map(|u| (u.id, u.name))
                .collect()
        };

        Ok(reviews
            .into_iter()
            .map(|r| {
                let name = names
                    .get(&r.user_id)
                    .cloned()
                    .unwrap_or_else(|| "Deleted user".to_string());
                Review::from_entity(r, name)
            })
            .collect())
    }

    /// Average rating and count for a course.
    pub async fn rating_summary(&self, course_id: i32) -> Result<RatingSummary, DbErr> {
        let totals = self.rating_totals(vec![course_id]).await?;

        Ok(totals
            .first()
            .map(RatingTotals::summary)
            .unwrap_or_default())
    }

    /// Rating sum and review count per course, for courses with reviews.
    pub async fn rating_totals(&self, course_ids: Vec<i32>) -> Result<Vec<RatingTotals>, DbErr> {
        if course_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<(i32, Option<i64>, i64)> = entity::prelude::CourseReview::find()
            .select_only()
            .column(entity::course_review::Column::CourseId)
            .column_as(entity::course_review::Column::Rating.sum(), "rating_sum")
            .column_as(entity::course_review::Column::Id.count(), "review_count")
            .filter(entity::course_review::Column::CourseId.is_in(course_ids))
            .group_by(entity::course_review::Column::CourseId)
            .order_by_asc(entity::course_review::Column::CourseId)
            .into_tuple()
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(course_id, rating_sum, count)| RatingTotals {
                course_id,
                rating_sum: rating_sum.unwrap_or(0),
                count: row_count(count),
            })
            .collect())
    }

    pub async fn delete(&self, review_id: i32) -> Result<(), DbErr> {
        entity::prelude::CourseReview::delete_by_id(review_id)
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn delete_by_course(&self, course_id: i32) -> Result<(), DbErr> {
        entity::prelude::CourseReview::delete_many()
            .filter(entity::course_review::Column::CourseId.eq(course_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn delete_by_user(&self, user_id: i32) -> Result<(), DbErr> {
        entity::prelude::CourseReview::delete_many()
            .filter(entity::course_review::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(())
    }
}
