//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Enforcing ownership, enrollment and workflow rules
//! - **Orchestration**: Coordinating repository calls, cascades and external providers
//! - **Domain Models**: Working with domain models rather than DTOs or entity models

pub mod ai;
pub mod application;
pub mod auth;
pub mod course;
pub mod curriculum;
pub mod dashboard;
pub mod download;
pub mod enrollment;
pub mod media;
pub mod resource;
pub mod review;
pub mod user;

#[cfg(test)]
mod test;

use sea_orm::{DbErr, SqlErr};

use crate::server::{error::AppError, model::user::Role};

/// Whether the authenticated user holds the admin role.
pub fn is_admin(user: &entity::user::Model) -> bool {
    Role::parse(&user.role) == Some(Role::Admin)
}

/// Reports a unique constraint violation as a 400 with `message`.
///
/// Covers the insert that loses a race against a concurrent duplicate after the
/// existence check passed.
pub fn duplicate_as_bad_request(err: DbErr, message: &str) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::BadRequest(message.to_string()),
        _ => AppError::DbErr(err),
    }
}
