pub use sea_orm_migration::prelude::*;

mod m20260105_000001_create_user_table;
mod m20260105_000002_create_course_table;
mod m20260105_000003_create_course_section_table;
mod m20260105_000004_create_lesson_table;
mod m20260105_000005_create_resource_table;
mod m20260105_000006_create_enrollment_table;
mod m20260105_000007_create_course_review_table;
mod m20260105_000008_create_resource_download_table;
mod m20260105_000009_create_ai_chat_session_table;
mod m20260105_000010_create_ai_chat_message_table;
mod m20260105_000011_create_ai_analytics_table;
mod m20260105_000012_create_user_achievement_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260105_000001_create_user_table::Migration),
            Box::new(m20260105_000002_create_course_table::Migration),
            Box::new(m20260105_000003_create_course_section_table::Migration),
            Box::new(m20260105_000004_create_lesson_table::Migration),
            Box::new(m20260105_000005_create_resource_table::Migration),
            Box::new(m20260105_000006_create_enrollment_table::Migration),
            Box::new(m20260105_000007_create_course_review_table::Migration),
            Box::new(m20260105_000008_create_resource_download_table::Migration),
            Box::new(m20260105_000009_create_ai_chat_session_table::Migration),
            Box::new(m20260105_000010_create_ai_chat_message_table::Migration),
            Box::new(m20260105_000011_create_ai_analytics_table::Migration),
            Box::new(m20260105_000012_create_user_achievement_table::Migration),
        ]
    }
}
