use std::collections::HashMap;

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        achievement::AchievementRepository, course::CourseRepository,
        enrollment::EnrollmentRepository, user::UserRepository,
    },
    error::AppError,
    model::{
        achievement::AchievementKind,
        enrollment::{EnrolledCourse, Enrollment, Learner, ProgressUpdate, COMPLETIONS_FOR_MILESTONE},
    },
    service::{
        course::{course_not_found, CourseService},
        duplicate_as_bad_request,
    },
};

const ALREADY_ENROLLED: &str = "Already enrolled";

pub struct EnrollmentService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EnrollmentService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Enrolls the user in a published course.
    ///
    /// The user's first enrollment earns the first enrollment achievement.
    ///
    /// # Returns
    /// - `Ok(Enrollment)` - Created enrollment
    /// - `Err(AppError::NotFound)` - Course does not exist
    /// - `Err(AppError::BadRequest)` - Course unpublished, user owns it, or already enrolled
    pub async fn enroll(&self, user_id: i32, course_id: i32) -> Result<Enrollment, AppError> {
        let course = CourseRepository::new(self.db)
            .find_by_id(course_id)
            .await?
            .ok_or_else(course_not_found)?;

        if !course.is_published {
            return Err(AppError::BadRequest(
                "Cannot enroll in an unpublished course".to_string(),
            ));
        }
        if course.instructor_id == user_id {
            return Err(AppError::BadRequest(
                "Instructors cannot enroll in their own course".to_string(),
            ));
        }

        let repo = EnrollmentRepository::new(self.db);
        if repo.is_enrolled(user_id, course_id).await? {
            return Err(AppError::BadRequest(ALREADY_ENROLLED.to_string()));
        }

        let enrollment = repo
            .create(user_id, course_id)
            .await
            .map_err(|e| duplicate_as_bad_request(e, ALREADY_ENROLLED))?;

        if repo.get_by_user(user_id).await?.len() == 1 {
            AchievementRepository::new(self.db)
                .award(user_id, AchievementKind::FirstEnrollment, None)
                .await?;
        }

        tracing::info!("User {} enrolled in course {}", user_id, course_id);

        Ok(enrollment)
    }

    pub async fn unenroll(&self, user_id: i32, course_id: i32) -> Result<(), AppError> {
        let repo = EnrollmentRepository::new(self.db);
        let Some(enrollment) = repo.find(user_id, course_id).await? else {
            return Err(AppError::BadRequest("Not enrolled".to_string()));
        };

        repo.delete(enrollment.id).await?;

        tracing::info!("User {} left course {}", user_id, course_id);

        Ok(())
    }

    /// Records course progress and awards completion achievements.
    ///
    /// Reaching 100 completes the enrollment. Completion of a course earns the
    /// course completed achievement; reaching [`COMPLETIONS_FOR_MILESTONE`]
    /// completed courses also earns the milestone achievement.
    ///
    /// # Returns
    /// - `Ok(ProgressUpdate)` - Updated enrollment and whether it just completed
    /// - `Err(AppError::BadRequest)` - Progress outside 0-100 or user not enrolled
    pub async fn update_progress(
        &self,
        user_id: i32,
        course_id: i32,
        progress: i32,
    ) -> Result<ProgressUpdate, AppError> {
        if !(0..=100).contains(&progress) {
            return Err(AppError::BadRequest(
                "Progress must be between 0 and 100".to_string(),
            ));
        }

        let repo = EnrollmentRepository::new(self.db);
        let Some(existing) = repo.find(user_id, course_id).await? else {
            return Err(AppError::BadRequest("Not enrolled".to_string()));
        };

        let enrollment = repo
            .update_progress(existing.id, progress)
            .await?
            .ok_or_else(|| AppError::NotFound("Enrollment not found".to_string()))?;
        let newly_completed = enrollment.completed && !existing.completed;

        if enrollment.completed {
            let achievements = AchievementRepository::new(self.db);
            achievements
                .award(user_id, AchievementKind::CourseCompleted, Some(course_id))
                .await?;

            if repo.count_completed_by_user(user_id).await? >= COMPLETIONS_FOR_MILESTONE {
                achievements
                    .award(user_id, AchievementKind::FiveCoursesCompleted, None)
                    .await?;
            }
        }

        if newly_completed {
            tracing::info!("User {} completed course {}", user_id, course_id);
        }

        Ok(ProgressUpdate {
            enrollment,
            newly_completed,
        })
    }

    /// Gets the user's enrollments paired with their courses, newest first.
    pub async fn get_enrolled(&self, user_id: i32) -> Result<Vec<EnrolledCourse>, AppError> {
        let enrollments = EnrollmentRepository::new(self.db)
            .get_by_user(user_id)
            .await?;
        let course_ids = enrollments.iter().map(|e| e.course_id).collect();

        let mut courses: HashMap<i32, _> = CourseRepository::new(self.db)
            .get_by_ids(course_ids)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        Ok(enrollments
            .into_iter()
            .filter_map(|enrollment| {
                courses
                    .remove(&enrollment.course_id)
                    .map(|course| EnrolledCourse { enrollment, course })
            })
            .collect())
    }

    /// Gets the learners of a course the user manages.
    pub async fn get_learners(
        &self,
        course_id: i32,
        user: &entity::user::Model,
    ) -> Result<Vec<Learner>, AppError> {
        CourseService::new(self.db).get_managed(course_id, user).await?;

        let enrollments = EnrollmentRepository::new(self.db)
            .get_by_course(course_id)
            .await?;
        let user_ids = enrollments.iter().map(|e| e.user_id).collect();
        let users: HashMap<i32, _> = UserRepository::new(self.db)
            .get_by_ids(user_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        Ok(enrollments
            .into_iter()
            .filter_map(|enrollment| {
                users.get(&enrollment.user_id).map(|user| Learner {
                    user_id: user.id,
                    name: user.name.clone(),
                    email: user.email.clone(),
                    progress: enrollment.progress,
                    completed: enrollment.completed,
                    enrolled_at: enrollment.enrolled_at,
                })
            })
            .collect())
    }
}
