use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateApplicationDto {
    pub motivation: String,
    pub expertise: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct RejectApplicationDto {
    pub reason: Option<String>,
}

/// An instructor application as stored on the applicant's account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApplicationDto {
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
