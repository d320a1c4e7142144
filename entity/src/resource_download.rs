use sea_orm::entity::prelude::*;

/// Append-only download audit record.
///
/// The resource columns are a snapshot taken at download time so the record stays
/// meaningful after the resource itself is edited or removed.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "resource_download")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub course_id: i32,
    pub resource_id: Option<i32>,
    pub resource_title: String,
    pub resource_type: String,
    pub resource_url: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub downloaded_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
