//! Instructor application models.

use chrono::{DateTime, Utc};

use crate::{
    model::application::{ApplicationDto, CreateApplicationDto},
    server::{error::AppError, util::validate::require_text},
};

/// Application fields projected from the applicant's user row.
#[derive(Debug, Clone, PartialEq)]
pub struct InstructorApplication {
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub status: String,
    pub motivation: Option<String>,
    pub expertise: Option<String>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<i32>,
    pub rejection_reason: Option<String>,
}

impl InstructorApplication {
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            user_id: entity.id,
            name: entity.name,
            email: entity.email,
            status: entity.application_status,
            motivation: entity.application_motivation,
            expertise: entity.application_expertise,
            submitted_at: entity.application_submitted_at,
            reviewed_at: entity.application_reviewed_at,
            reviewed_by: entity.application_reviewed_by,
            rejection_reason: entity.application_rejection_reason,
        }
    }

    pub fn into_dto(self) -> ApplicationDto {
        ApplicationDto {
            user_id: self.user_id,
            name: self.name,
            email: self.email,
            status: self.status,
            motivation: self.motivation,
            expertise: self.expertise,
            submitted_at: self.submitted_at,
            reviewed_at: self.reviewed_at,
            reviewed_by: self.reviewed_by,
            rejection_reason: self.rejection_reason,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SubmitApplicationParams {
    pub user_id: i32,
    pub motivation: String,
    pub expertise: Option<String>,
}

impl SubmitApplicationParams {
    pub fn from_dto(user_id: i32, dto: CreateApplicationDto) -> Result<Self, AppError> {
        Ok(Self {
            user_id,
            motivation: require_text("Motivation", &dto.motivation)?,
            expertise: dto
                .expertise
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty()),
        })
    }
}
