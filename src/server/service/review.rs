use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        course::CourseRepository, enrollment::EnrollmentRepository, review::ReviewRepository,
    },
    error::{auth::AuthError, AppError},
    model::review::{CreateReviewParams, Review},
    service::{course::course_not_found, duplicate_as_bad_request, is_admin},
};

const ALREADY_REVIEWED: &str = "You have already reviewed this course";

pub struct ReviewService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReviewService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets a course's reviews, newest first.
    pub async fn get_by_course(&self, course_id: i32) -> Result<Vec<Review>, AppError> {
        if CourseRepository::new(self.db)
            .find_by_id(course_id)
            .await?
            .is_none()
        {
            return Err(course_not_found());
        }

        Ok(ReviewRepository::new(self.db)
            .get_by_course(course_id)
            .await?)
    }

    /// Posts the author's single review of a course they are enrolled in.
    ///
    /// # Returns
    /// - `Ok(Review)` - Created review
    /// - `Err(AppError::NotFound)` - Course does not exist
    /// - `Err(AppError::BadRequest)` - Author not enrolled or already reviewed
    pub async fn create(
        &self,
        author: &entity::user::Model,
        params: CreateReviewParams,
    ) -> Result<Review, AppError> {
        if CourseRepository::new(self.db)
            .find_by_id(params.course_id)
            .await?
            .is_none()
        {
            return Err(course_not_found());
        }

        if !EnrollmentRepository::new(self.db)
            .is_enrolled(author.id, params.course_id)
            .await?
        {
            return Err(AppError::BadRequest(
                "You must be enrolled to review this course".to_string(),
            ));
        }

        let repo = ReviewRepository::new(self.db);
        if repo.exists(author.id, params.course_id).await? {
            return Err(AppError::BadRequest(ALREADY_REVIEWED.to_string()));
        }

        repo.create(params, author.name.clone())
            .await
            .map_err(|e| duplicate_as_bad_request(e, ALREADY_REVIEWED))
    }

    /// Deletes a review. Only its author or an admin may do so.
    pub async fn delete(
        &self,
        course_id: i32,
        review_id: i32,
        user: &entity::user::Model,
    ) -> Result<(), AppError> {
        let repo = ReviewRepository::new(self.db);
        let review = repo
            .find_by_id(review_id)
            .await?
            .filter(|r| r.course_id == course_id)
            .ok_or_else(|| AppError::NotFound("Review not found".to_string()))?;

        if review.user_id != user.id && !is_admin(user) {
            return Err(AuthError::AccessDenied(
                user.id,
                format!("User is not allowed to delete review {}", review_id),
            )
            .into());
        }

        repo.delete(review_id).await?;

        Ok(())
    }
}
