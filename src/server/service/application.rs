//! Instructor application workflow.
//!
//! Learners apply once; admins approve (promoting the learner to instructor) or
//! reject. Approved and rejected applications are final.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::AppError,
    model::{
        application::{InstructorApplication, SubmitApplicationParams},
        user::{ApplicationStatus, Role, User},
    },
};

pub struct ApplicationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ApplicationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Submits a learner's application to become an instructor.
    ///
    /// # Returns
    /// - `Ok(InstructorApplication)` - Pending application
    /// - `Err(AppError::BadRequest)` - Applicant is not a learner or has already applied
    pub async fn submit(
        &self,
        params: SubmitApplicationParams,
    ) -> Result<InstructorApplication, AppError> {
        let repo = UserRepository::new(self.db);
        let user = self.find_user(params.user_id).await?;

        if user.role != Role::Learner {
            return Err(AppError::BadRequest(
                "Only learners can apply to become instructors".to_string(),
            ));
        }
        match user.application_status {
            ApplicationStatus::None => {}
            ApplicationStatus::Pending => {
                return Err(AppError::BadRequest(
                    "Application already pending".to_string(),
                ))
            }
            ApplicationStatus::Approved | ApplicationStatus::Rejected => {
                return Err(AppError::BadRequest(
                    "Application has already been reviewed".to_string(),
                ))
            }
        }

        let application = repo
            .submit_application(params.user_id, params.motivation, params.expertise)
            .await?
            .ok_or_else(user_not_found)?;

        tracing::info!("User {} applied to become an instructor", params.user_id);

        Ok(application)
    }

    /// Gets the caller's application state.
    pub async fn get_mine(&self, user_id: i32) -> Result<InstructorApplication, AppError> {
        UserRepository::new(self.db)
            .find_model_by_id(user_id)
            .await?
            .map(InstructorApplication::from_entity)
            .ok_or_else(user_not_found)
    }

    /// Lists applications in a state, oldest submission first.
    pub async fn get_by_status(
        &self,
        status: ApplicationStatus,
    ) -> Result<Vec<InstructorApplication>, AppError> {
        Ok(UserRepository::new(self.db)
            .get_applications_by_status(status)
            .await?)
    }

    /// Approves a pending application and promotes the applicant to instructor.
    pub async fn approve(
        &self,
        applicant_id: i32,
        reviewer_id: i32,
    ) -> Result<InstructorApplication, AppError> {
        self.review(applicant_id, reviewer_id, true, None).await
    }

    /// Rejects a pending application, leaving the applicant's role unchanged.
    pub async fn reject(
        &self,
        applicant_id: i32,
        reviewer_id: i32,
        reason: Option<String>,
    ) -> Result<InstructorApplication, AppError> {
        self.review(applicant_id, reviewer_id, false, reason).await
    }

    async fn review(
        &self,
        applicant_id: i32,
        reviewer_id: i32,
        approved: bool,
        reason: Option<String>,
    ) -> Result<InstructorApplication, AppError> {
        let user = self.find_user(applicant_id).await?;
        if user.application_status != ApplicationStatus::Pending {
            return Err(AppError::BadRequest(
                "Application is not pending".to_string(),
            ));
        }

        let application = UserRepository::new(self.db)
            .review_application(applicant_id, reviewer_id, approved, reason)
            .await?
            .ok_or_else(user_not_found)?;

        tracing::info!(
            "Admin {} {} instructor application of user {}",
            reviewer_id,
            if approved { "approved" } else { "rejected" },
            applicant_id
        );

        Ok(application)
    }

    async fn find_user(&self, user_id: i32) -> Result<User, AppError> {
        UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .ok_or_else(user_not_found)
    }
}

fn user_not_found() -> AppError {
    AppError::NotFound("User not found".to_string())
}
