//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for managing user records in the database.
//! It handles account creation, credential lookups, profile and role updates, password
//! reset tokens and the instructor application fields stored on the user row.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::{
    model::api::MAX_PAGE,
    server::model::{
        application::InstructorApplication,
        user::{ApplicationStatus, CreateUserParams, Role, UpdateProfileParams, User, UserFilter},
    },
};

/// Repository providing database operations for user management.
pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `UserRepository` - New repository instance
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new active account with no instructor application.
    ///
    /// # Arguments
    /// - `params` - Name, normalized email, password hash and role
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(DbErr)` - Database error, including unique email violations
    pub async fn create(&self, params: CreateUserParams) -> Result<User, DbErr> {
        let now = Utc::now();
        let entity = entity::user::ActiveModel {
            name: ActiveValue::Set(params.name),
            email: ActiveValue::Set(params.email),
            password_hash: ActiveValue::Set(params.password_hash),
            role: ActiveValue::Set(params.role.as_str().to_string()),
            is_active: ActiveValue::Set(true),
            application_status: ActiveValue::Set(ApplicationStatus::None.as_str().to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        User::from_entity(entity)
    }

    /// Finds a user by ID.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - User found
    /// - `Ok(None)` - No user with that ID
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, user_id: i32) -> Result<Option<User>, DbErr> {
        self.find_model_by_id(user_id)
            .await?
            .map(User::from_entity)
            .transpose()
    }

    /// Finds the raw user row by ID, including credential and application columns.
    pub async fn find_model_by_id(
        &self,
        user_id: i32,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find_by_id(user_id).one(self.db).await
    }

    /// Finds the raw user row by normalized email.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await
    }

    /// Checks whether an account already uses the email.
    pub async fn email_exists(&self, email: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Checks if any admin users exist in the database.
    ///
    /// Used during startup to decide whether the bootstrap admin account should be
    /// created from configuration.
    ///
    /// # Returns
    /// - `Ok(true)` - At least one admin user exists in the database
    /// - `Ok(false)` - No admin users exist
    /// - `Err(DbErr)` - Database error during count query
    pub async fn admin_exists(&self) -> Result<bool, DbErr> {
        let admin_count = entity::prelude::User::find()
            .filter(entity::user::Column::Role.eq(Role::Admin.as_str()))
            .count(self.db)
            .await?;

        Ok(admin_count > 0)
    }

    /// Gets users with pagination, newest first.
    ///
    /// # Arguments
    /// - `filter` - Optional role and name/email search
    /// - `page` - Zero-based page number
    /// - `per_page` - Number of users per page
    ///
    /// # Returns
    /// - `Ok((users, total))` - Users of the page and total matching users
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn get_paginated(
        &self,
        filter: &UserFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<User>, u64), DbErr> {
        let mut query = entity::prelude::User::find();

        if let Some(role) = filter.role {
            query = query.filter(entity::user::Column::Role.eq(role.as_str()));
        }
        if let Some(search) = filter.search.as_deref() {
            query = query.filter(
                Condition::any()
                    .add(entity::user::Column::Name.contains(search))
                    .add(entity::user::Column::Email.contains(search)),
            );
        }

        let paginator = query
            .order_by_desc(entity::user::Column::CreatedAt)
            .order_by_desc(entity::user::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let users = paginator
            .fetch_page(page.min(MAX_PAGE))
            .await?
            .into_iter()
            .map(User::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((users, total))
    }

    /// Gets all users with the given IDs.
    pub async fn get_by_ids(&self, ids: Vec<i32>) -> Result<Vec<User>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::User::find()
            .filter(entity::user::Column::Id.is_in(ids))
            .all(self.db)
            .await?
            .into_iter()
            .map(User::from_entity)
            .collect()
    }

    /// Applies a partial profile update.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - Updated user
    /// - `Ok(None)` - User does not exist
    /// - `Err(DbErr)` - Database error during update
    pub async fn update_profile(
        &self,
        user_id: i32,
        params: UpdateProfileParams,
    ) -> Result<Option<User>, DbErr> {
        let Some(model) = self.find_model_by_id(user_id).await? else {
            return Ok(None);
        };

        let mut active = model.into_active_model();
        if let Some(name) = params.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(bio) = params.bio {
            active.bio = ActiveValue::Set(Some(bio));
        }
        if let Some(avatar_url) = params.avatar_url {
            active.avatar_url = ActiveValue::Set(Some(avatar_url));
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        let updated = active.update(self.db).await?;
        User::from_entity(updated).map(Some)
    }

    /// Replaces the password hash and clears any outstanding reset token.
    pub async fn update_password(&self, user_id: i32, password_hash: String) -> Result<(), DbErr> {
        let Some(model) = self.find_model_by_id(user_id).await? else {
            return Err(DbErr::RecordNotFound(format!("User {} not found", user_id)));
        };

        let mut active = model.into_active_model();
        active.password_hash = ActiveValue::Set(password_hash);
        active.reset_token_hash = ActiveValue::Set(None);
        active.reset_token_expires_at = ActiveValue::Set(None);
        active.updated_at = ActiveValue::Set(Utc::now());
        active.update(self.db).await?;

        Ok(())
    }

    /// Records a successful login.
    pub async fn update_last_login(&self, user_id: i32) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .col_expr(
                entity::user::Column::LastLoginAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .filter(entity::user::Column::Id.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Stores the digest and expiry of a newly issued password reset token.
    pub async fn set_reset_token(
        &self,
        user_id: i32,
        token_hash: String,
        expires_at: DateTime<Utc>,
    ) -> Result<(), DbErr> {
        let Some(model) = self.find_model_by_id(user_id).await? else {
            return Err(DbErr::RecordNotFound(format!("User {} not found", user_id)));
        };

        let mut active = model.into_active_model();
        active.reset_token_hash = ActiveValue::Set(Some(token_hash));
        active.reset_token_expires_at = ActiveValue::Set(Some(expires_at));
        active.update(self.db).await?;

        Ok(())
    }

    /// Finds the user holding an unexpired reset token with the given digest.
    pub async fn find_by_reset_token(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::ResetTokenHash.eq(token_hash))
            .filter(entity::user::Column::ResetTokenExpiresAt.gt(now))
            .one(self.db)
            .await
    }

    /// Sets a user's role.
    pub async fn set_role(&self, user_id: i32, role: Role) -> Result<Option<User>, DbErr> {
        let Some(model) = self.find_model_by_id(user_id).await? else {
            return Ok(None);
        };

        let mut active = model.into_active_model();
        active.role = ActiveValue::Set(role.as_str().to_string());
        active.updated_at = ActiveValue::Set(Utc::now());

        let updated = active.update(self.db).await?;
        User::from_entity(updated).map(Some)
    }

    /// Enables or disables an account.
    pub async fn set_active(&self, user_id: i32, is_active: bool) -> Result<Option<User>, DbErr> {
        let Some(model) = self.find_model_by_id(user_id).await? else {
            return Ok(None);
        };

        let mut active = model.into_active_model();
        active.is_active = ActiveValue::Set(is_active);
        active.updated_at = ActiveValue::Set(Utc::now());

        let updated = active.update(self.db).await?;
        User::from_entity(updated).map(Some)
    }

    /// Deletes a user row. Dependent rows must already be removed.
    pub async fn delete(&self, user_id: i32) -> Result<(), DbErr> {
        entity::prelude::User::delete_by_id(user_id)
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Counts users with the given role.
    pub async fn count_by_role(&self, role: Role) -> Result<u64, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Role.eq(role.as_str()))
            .count(self.db)
            .await
    }

    /// Counts enabled or disabled accounts.
    pub async fn count_by_active(&self, is_active: bool) -> Result<u64, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::IsActive.eq(is_active))
            .count(self.db)
            .await
    }

    /// Gets signup timestamps of accounts created at or after `since`.
    pub async fn get_signup_dates_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<DateTime<Utc>>, DbErr> {
        let users = entity::prelude::User::find()
            .filter(entity::user::Column::CreatedAt.gte(since))
            .all(self.db)
            .await?;

        Ok(users.into_iter().map(|u| u.created_at).collect())
    }

    /// Marks the user's instructor application as pending.
    pub async fn submit_application(
        &self,
        user_id: i32,
        motivation: String,
        expertise: Option<String>,
    ) -> Result<Option<InstructorApplication>, DbErr> {
        let Some(model) = self.find_model_by_id(user_id).await? else {
            return Ok(None);
        };

        let now = Utc::now();
        let mut active = model.into_active_model();
        active.application_status = ActiveValue::Set(ApplicationStatus::Pending.as_str().to_string());
        active.application_motivation = ActiveValue::Set(Some(motivation));
        active.application_expertise = ActiveValue::Set(expertise);
        active.application_submitted_at = ActiveValue::Set(Some(now));
        active.updated_at = ActiveValue::Set(now);

        let updated = active.update(self.db).await?;
        Ok(Some(InstructorApplication::from_entity(updated)))
    }

    /// Records the review outcome of a pending application.
    ///
    /// Approval also promotes the applicant to instructor; rejection leaves the
    /// role unchanged.
    ///
    /// # Arguments
    /// - `user_id` - Applicant
    /// - `reviewer_id` - Admin reviewing the application
    /// - `approved` - Whether the application is approved
    /// - `reason` - Optional rejection reason
    ///
    /// # Returns
    /// - `Ok(Some(InstructorApplication))` - Updated application
    /// - `Ok(None)` - Applicant does not exist
    /// - `Err(DbErr)` - Database error during update
    pub async fn review_application(
        &self,
        user_id: i32,
        reviewer_id: i32,
        approved: bool,
        reason: Option<String>,
    ) -> Result<Option<InstructorApplication>, DbErr> {
        let Some(model) = self.find_model_by_id(user_id).await? else {
            return Ok(None);
        };

        let now = Utc::now();
        let mut active = model.into_active_model();
        if approved {
            active.application_status =
                ActiveValue::Set(ApplicationStatus::Approved.as_str().to_string());
            active.role = ActiveValue::Set(Role::Instructor.as_str().to_string());
        } else {
            active.application_status =
                ActiveValue::Set(ApplicationStatus::Rejected.as_str().to_string());
            active.application_rejection_reason = ActiveValue::Set(reason);
        }
        active.application_reviewed_at = ActiveValue::Set(Some(now));
        active.application_reviewed_by = ActiveValue::Set(Some(reviewer_id));
        active.updated_at = ActiveValue::Set(now);

        let updated = active.update(self.db).await?;
        Ok(Some(InstructorApplication::from_entity(updated)))
    }

    /// Gets applications in the given state, oldest submission first.
    pub async fn get_applications_by_status(
        &self,
        status: ApplicationStatus,
    ) -> Result<Vec<InstructorApplication>, DbErr> {
        let users = entity::prelude::User::find()
            .filter(entity::user::Column::ApplicationStatus.eq(status.as_str()))
            .order_by_asc(entity::user::Column::ApplicationSubmittedAt)
            .order_by_asc(entity::user::Column::Id)
            .all(self.db)
            .await?;

        Ok(users
            .into_iter()
            .map(InstructorApplication::from_entity)
            .collect())
    }

    /// Counts applications in the given state.
    pub async fn count_applications(&self, status: ApplicationStatus) -> Result<u64, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::ApplicationStatus.eq(status.as_str()))
            .count(self.db)
            .await
    }
}
