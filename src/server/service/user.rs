//! Profile and admin user management.

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::api::total_pages,
    server::{
        data::{
            achievement::AchievementRepository,
            ai::{AiAnalyticsRepository, ChatMessageRepository, ChatSessionRepository},
            course::CourseRepository,
            download::DownloadRepository,
            enrollment::EnrollmentRepository,
            resource::ResourceRepository,
            review::ReviewRepository,
            user::UserRepository,
        },
        error::AppError,
        model::{
            achievement::Achievement,
            user::{PaginatedUsers, Role, UpdateProfileParams, User, UserFilter},
        },
    },
};

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_by_id(&self, user_id: i32) -> Result<Option<User>, AppError> {
        Ok(UserRepository::new(self.db).find_by_id(user_id).await?)
    }

    pub async fn update_profile(
        &self,
        user_id: i32,
        params: UpdateProfileParams,
    ) -> Result<User, AppError> {
        UserRepository::new(self.db)
            .update_profile(user_id, params)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    pub async fn get_achievements(&self, user_id: i32) -> Result<Vec<Achievement>, AppError> {
        Ok(AchievementRepository::new(self.db)
            .get_by_user(user_id)
            .await?)
    }

    /// Gets users for the admin listing.
    pub async fn get_paginated(
        &self,
        filter: UserFilter,
        page: u64,
        per_page: u64,
    ) -> Result<PaginatedUsers, AppError> {
        let (users, total) = UserRepository::new(self.db)
            .get_paginated(&filter, page, per_page)
            .await?;

        Ok(PaginatedUsers {
            users,
            total,
            page,
            per_page,
            total_pages: total_pages(total, per_page),
        })
    }

    /// Changes another user's role.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - Updated user
    /// - `Ok(None)` - User not found
    /// - `Err(AppError::BadRequest)` - Admin attempted to change their own role
    pub async fn set_role(
        &self,
        acting_admin_id: i32,
        user_id: i32,
        role: Role,
    ) -> Result<Option<User>, AppError> {
        if acting_admin_id == user_id {
            return Err(AppError::BadRequest(
                "You cannot change your own role".to_string(),
            ));
        }

        let user = UserRepository::new(self.db).set_role(user_id, role).await?;
        if user.is_some() {
            tracing::info!(
                "Admin {} set role of user {} to {}",
                acting_admin_id,
                user_id,
                role.as_str()
            );
        }

        Ok(user)
    }

    /// Enables or disables another user's account.
    pub async fn set_active(
        &self,
        acting_admin_id: i32,
        user_id: i32,
        is_active: bool,
    ) -> Result<Option<User>, AppError> {
        if acting_admin_id == user_id && !is_active {
            return Err(AppError::BadRequest(
                "You cannot disable your own account".to_string(),
            ));
        }

        let user = UserRepository::new(self.db)
            .set_active(user_id, is_active)
            .await?;
        if user.is_some() {
            tracing::info!(
                "Admin {} set user {} active={}",
                acting_admin_id,
                user_id,
                is_active
            );
        }

        Ok(user)
    }

    /// Deletes a user and everything they own except courses.
    ///
    /// Users that still own courses cannot be deleted; their courses must be
    /// removed or reassigned first.
    ///
    /// # Returns
    /// - `Ok(true)` - User deleted
    /// - `Ok(false)` - User not found
    /// - `Err(AppError::BadRequest)` - Self-deletion or user owns courses
    pub async fn delete(&self, acting_admin_id: i32, user_id: i32) -> Result<bool, AppError> {
        if acting_admin_id == user_id {
            return Err(AppError::BadRequest(
                "You cannot delete your own account".to_string(),
            ));
        }

        let user_repo = UserRepository::new(self.db);
        if user_repo.find_model_by_id(user_id).await?.is_none() {
            return Ok(false);
        }

        if CourseRepository::new(self.db)
            .count_by_instructor(user_id)
            .await?
            > 0
        {
            return Err(AppError::BadRequest(
                "User owns courses and cannot be deleted".to_string(),
            ));
        }

        let txn = self.db.begin().await?;

        let sessions = ChatSessionRepository::new(&txn);
        let session_ids = sessions.get_ids_by_user(user_id).await?;
        ChatMessageRepository::new(&txn)
            .delete_by_sessions(session_ids.clone())
            .await?;
        sessions.delete_many(session_ids).await?;
        AiAnalyticsRepository::new(&txn).delete_by_user(user_id).await?;
        EnrollmentRepository::new(&txn).delete_by_user(user_id).await?;
        ReviewRepository::new(&txn).delete_by_user(user_id).await?;
        AchievementRepository::new(&txn).delete_by_user(user_id).await?;
        DownloadRepository::new(&txn).delete_by_user(user_id).await?;
        ResourceRepository::new(&txn)
            .delete_by_uploader(user_id)
            .await?;
        UserRepository::new(&txn).delete(user_id).await?;

        txn.commit().await?;

        tracing::info!("Admin {} deleted user {}", acting_admin_id, user_id);

        Ok(true)
    }
}
