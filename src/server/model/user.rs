//! User domain models and parameters.
//!
//! Provides the user model with role and instructor application state, plus the
//! parameter types used by registration, profile edits and admin user management.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::{
    model::{
        auth::{AuthResponseDto, RegisterDto, UpdateProfileDto},
        user::{PaginatedUsersDto, UserDto},
    },
    server::{
        error::AppError,
        util::validate::{normalize_email, require_text, validate_password, validate_url},
    },
};

/// The three account roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Instructor,
    Learner,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Instructor, Role::Learner];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Instructor => "instructor",
            Role::Learner => "learner",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "instructor" => Some(Role::Instructor),
            "learner" => Some(Role::Learner),
            _ => None,
        }
    }

    /// Whether the role may author courses.
    pub fn can_teach(&self) -> bool {
        matches!(self, Role::Admin | Role::Instructor)
    }
}

/// Instructor application state stored on the user.
///
/// `None → Pending → Approved | Rejected`; the last two are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationStatus {
    None,
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::None => "none",
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "none" => Some(ApplicationStatus::None),
            "pending" => Some(ApplicationStatus::Pending),
            "approved" => Some(ApplicationStatus::Approved),
            "rejected" => Some(ApplicationStatus::Rejected),
            _ => None,
        }
    }
}

/// Account with role, profile and application state.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub is_active: bool,
    pub application_status: ApplicationStatus,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Converts an entity model to a user domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(User)` - The converted user domain model
    /// - `Err(DbErr::Custom)` - Stored role or application status is not recognised
    pub fn from_entity(entity: entity::user::Model) -> Result<Self, DbErr> {
        let role = Role::parse(&entity.role)
            .ok_or_else(|| DbErr::Custom(format!("Unknown role '{}'", entity.role)))?;
        let application_status = ApplicationStatus::parse(&entity.application_status)
            .ok_or_else(|| {
                DbErr::Custom(format!(
                    "Unknown application status '{}'",
                    entity.application_status
                ))
            })?;

        Ok(Self {
            id: entity.id,
            name: entity.name,
            email: entity.email,
            role,
            bio: entity.bio,
            avatar_url: entity.avatar_url,
            is_active: entity.is_active,
            application_status,
            last_login_at: entity.last_login_at,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            name: self.name,
            email: self.email,
            role: self.role.as_str().to_string(),
            bio: self.bio,
            avatar_url: self.avatar_url,
            is_active: self.is_active,
            application_status: self.application_status.as_str().to_string(),
            last_login_at: self.last_login_at,
            created_at: self.created_at,
        }
    }
}

/// Paginated collection of users.
#[derive(Debug, Clone)]
pub struct PaginatedUsers {
    pub users: Vec<User>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedUsers {
    pub fn into_dto(self) -> PaginatedUsersDto {
        PaginatedUsersDto {
            users: self.users.into_iter().map(User::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

/// Filters for the admin user listing.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub role: Option<Role>,
    /// Substring matched against name or email.
    pub search: Option<String>,
}

/// Parameters for inserting a new account.
#[derive(Debug, Clone)]
pub struct CreateUserParams {
    pub name: String,
    /// Already normalized to lowercase.
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Partial profile update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileParams {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

impl UpdateProfileParams {
    pub fn from_dto(dto: UpdateProfileDto) -> Result<Self, AppError> {
        Ok(Self {
            name: dto.name.map(|n| require_text("Name", &n)).transpose()?,
            bio: dto.bio.map(|b| b.trim().to_string()),
            avatar_url: dto.avatar_url.map(|u| validate_url(&u)).transpose()?,
        })
    }
}

/// Validated self-registration input. The password is still plain text.
#[derive(Debug, Clone)]
pub struct RegisterParams {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterParams {
    pub fn from_dto(dto: RegisterDto) -> Result<Self, AppError> {
        let name = require_text("Name", &dto.name)?;
        let email = normalize_email(&dto.email)?;
        validate_password(&dto.password)?;

        Ok(Self {
            name,
            email,
            password: dto.password,
        })
    }
}

/// A signed access token together with the user it was issued to.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

impl AuthSession {
    pub fn into_dto(self) -> AuthResponseDto {
        AuthResponseDto {
            token: self.token,
            user: self.user.into_dto(),
        }
    }
}
