use chrono::{DateTime, Utc};

use crate::{
    model::course::{CreateReviewDto, ReviewDto},
    server::error::AppError,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: i32,
    pub course_id: i32,
    pub user_id: i32,
    pub user_name: String,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn from_entity(entity: entity::course_review::Model, user_name: String) -> Self {
        Self {
            id: entity.id,
            course_id: entity.course_id,
            user_id: entity.user_id,
            user_name,
            rating: entity.rating,
            comment: entity.comment,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> ReviewDto {
        ReviewDto {
            id: self.id,
            course_id: self.course_id,
            user_id: self.user_id,
            user_name: self.user_name,
            rating: self.rating,
            comment: self.comment,
            created_at: self.created_at,
        }
    }
}

/// Average rating and number of reviews for a course.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RatingSummary {
    pub average: Option<f64>,
    pub count: u64,
}

impl RatingSummary {
    /// Summary of `count` ratings adding up to `rating_sum`.
    pub fn from_totals(rating_sum: i64, count: u64) -> Self {
        Self {
            average: (count > 0).then(|| rating_sum as f64 / count as f64),
            count,
        }
    }
}

/// Rating sum and review count of one course, aggregated in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingTotals {
    pub course_id: i32,
    pub rating_sum: i64,
    pub count: u64,
}

impl RatingTotals {
    pub fn summary(&self) -> RatingSummary {
        RatingSummary::from_totals(self.rating_sum, self.count)
    }
}

#[derive(Debug, Clone)]
pub struct CreateReviewParams {
    pub course_id: i32,
    pub user_id: i32,
    pub rating: i32,
    pub comment: Option<String>,
}

impl CreateReviewParams {
    pub fn from_dto(course_id: i32, user_id: i32, dto: CreateReviewDto) -> Result<Self, AppError> {
        if !(1..=5).contains(&dto.rating) {
            return Err(AppError::BadRequest(
                "Rating must be between 1 and 5".to_string(),
            ));
        }

        Ok(Self {
            course_id,
            user_id,
            rating: dto.rating,
            comment: dto
                .comment
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
        })
    }
}
