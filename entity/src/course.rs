use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "course")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub category: String,
    /// One of `beginner`, `intermediate` or `advanced`.
    pub level: String,
    pub price: f64,
    pub thumbnail_url: Option<String>,
    pub instructor_id: i32,
    pub is_published: bool,
    /// Sum of lesson durations in minutes.
    pub total_duration: i32,
    pub total_lessons: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
