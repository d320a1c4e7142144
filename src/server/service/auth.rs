//! Account authentication: registration, login and password management.

use chrono::{Duration, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::{AuthSession, CreateUserParams, RegisterParams, Role, User},
    util::{
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        token::{generate_token, hash_token, RESET_TOKEN_LENGTH},
        validate::{normalize_email, validate_password},
    },
    service::duplicate_as_bad_request,
};

/// Lifetime of a password reset token.
const RESET_TOKEN_TTL_HOURS: i64 = 1;

const USER_EXISTS: &str = "User already exists";

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    jwt: &'a JwtKeys,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection, jwt: &'a JwtKeys) -> Self {
        Self { db, jwt }
    }

    /// Creates a learner account and signs the user in.
    ///
    /// # Returns
    /// - `Ok(AuthSession)` - Token and created user
    /// - `Err(AppError::BadRequest)` - Email already registered
    pub async fn register(&self, params: RegisterParams) -> Result<AuthSession, AppError> {
        let user_repo = UserRepository::new(self.db);

        if user_repo.email_exists(&params.email).await? {
            return Err(AppError::BadRequest(USER_EXISTS.to_string()));
        }

        let user = user_repo
            .create(CreateUserParams {
                name: params.name,
                email: params.email,
                password_hash: hash_password(&params.password)?,
                role: Role::Learner,
            })
            .await
            .map_err(|e| duplicate_as_bad_request(e, USER_EXISTS))?;

        tracing::info!("Registered user {} ({})", user.id, user.email);

        self.session_for(user)
    }

    /// Verifies credentials and records the login.
    ///
    /// Unknown emails and wrong passwords yield the same error so callers cannot
    /// discover which accounts exist.
    ///
    /// # Returns
    /// - `Ok(AuthSession)` - Token and user
    /// - `Err(AppError::AuthErr(InvalidCredentials))` - Unknown email or wrong password
    /// - `Err(AppError::AuthErr(AccountDisabled))` - Account disabled by an admin
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AppError> {
        let user_repo = UserRepository::new(self.db);
        let email = email.trim().to_lowercase();

        let Some(model) = user_repo.find_by_email(&email).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !verify_password(password, &model.password_hash) {
            return Err(AuthError::InvalidCredentials.into());
        }

        if !model.is_active {
            return Err(AuthError::AccountDisabled(model.id).into());
        }

        user_repo.update_last_login(model.id).await?;
        let user = user_repo
            .find_by_id(model.id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        self.session_for(user)
    }

    /// Replaces the password after checking the current one.
    pub async fn change_password(
        &self,
        user: &entity::user::Model,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        validate_password(new_password)?;

        if !verify_password(current_password, &user.password_hash) {
            return Err(AppError::BadRequest(
                "Current password is incorrect".to_string(),
            ));
        }

        UserRepository::new(self.db)
            .update_password(user.id, hash_password(new_password)?)
            .await?;

        Ok(())
    }

    /// Issues a password reset token for the account with this email, if any.
    ///
    /// Only the SHA-256 digest of the token is stored. Unknown or disabled
    /// accounts produce `Ok(None)` so the caller can answer uniformly.
    ///
    /// # Returns
    /// - `Ok(Some(String))` - Raw token to hand to the account owner
    /// - `Ok(None)` - No active account uses the email
    pub async fn forgot_password(&self, email: &str) -> Result<Option<String>, AppError> {
        let user_repo = UserRepository::new(self.db);

        let Ok(email) = normalize_email(email) else {
            return Ok(None);
        };
        let Some(user) = user_repo.find_by_email(&email).await? else {
            tracing::debug!("Password reset requested for unknown email");
            return Ok(None);
        };
        if !user.is_active {
            return Ok(None);
        }

        let token = generate_token(RESET_TOKEN_LENGTH);
        let expires_at = Utc::now() + Duration::hours(RESET_TOKEN_TTL_HOURS);
        user_repo
            .set_reset_token(user.id, hash_token(&token), expires_at)
            .await?;

        tracing::info!("Issued password reset token for user {}", user.id);

        Ok(Some(token))
    }

    /// Redeems a reset token. Tokens are cleared on use.
    ///
    /// # Returns
    /// - `Ok(())` - Password replaced
    /// - `Err(AppError::BadRequest)` - Unknown, used or expired token, or weak password
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), AppError> {
        validate_password(new_password)?;

        let user_repo = UserRepository::new(self.db);
        let Some(user) = user_repo
            .find_by_reset_token(&hash_token(token.trim()), Utc::now())
            .await?
        else {
            return Err(AppError::BadRequest(
                "Invalid or expired reset token".to_string(),
            ));
        };

        user_repo
            .update_password(user.id, hash_password(new_password)?)
            .await?;

        tracing::info!("Password reset for user {}", user.id);

        Ok(())
    }

    /// Creates the first admin account when none exists yet.
    ///
    /// An existing account with the same email is left untouched.
    ///
    /// # Returns
    /// - `Ok(true)` - Admin account created
    /// - `Ok(false)` - An admin already exists or the email is taken
    pub async fn ensure_admin(&self, email: &str, password: &str) -> Result<bool, AppError> {
        let user_repo = UserRepository::new(self.db);
        if user_repo.admin_exists().await? {
            return Ok(false);
        }

        let email = normalize_email(email)?;
        validate_password(password)?;

        if user_repo.email_exists(&email).await? {
            tracing::warn!(
                "No admin exists but {} is already registered; skipping admin bootstrap",
                email
            );
            return Ok(false);
        }

        let user = user_repo
            .create(CreateUserParams {
                name: "Administrator".to_string(),
                email,
                password_hash: hash_password(password)?,
                role: Role::Admin,
            })
            .await?;

        tracing::info!("Created admin account {} ({})", user.id, user.email);

        Ok(true)
    }

    fn session_for(&self, user: User) -> Result<AuthSession, AppError> {
        let token = self.jwt.issue(user.id, user.role.as_str())?;

        Ok(AuthSession { token, user })
    }
}
