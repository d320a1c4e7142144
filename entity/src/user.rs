use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    /// One of `admin`, `instructor` or `learner`.
    pub role: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub is_active: bool,
    /// SHA-256 hex digest of the outstanding password reset token.
    pub reset_token_hash: Option<String>,
    pub reset_token_expires_at: Option<DateTimeUtc>,
    /// One of `none`, `pending`, `approved` or `rejected`.
    pub application_status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub application_motivation: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub application_expertise: Option<String>,
    pub application_submitted_at: Option<DateTimeUtc>,
    pub application_reviewed_at: Option<DateTimeUtc>,
    pub application_reviewed_by: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub application_rejection_reason: Option<String>,
    pub last_login_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
