use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260105_000001_create_user_table::User, m20260105_000002_create_course_table::Course,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AiAnalytics::Table)
                    .if_not_exists()
                    .col(pk_auto(AiAnalytics::Id))
                    .col(integer(AiAnalytics::UserId))
                    .col(integer_null(AiAnalytics::CourseId))
                    .col(integer(AiAnalytics::TotalSessions).default(0))
                    .col(integer(AiAnalytics::TotalMessages).default(0))
                    .col(big_integer(AiAnalytics::TotalTokens).default(0))
                    .col(
                        timestamp_with_time_zone(AiAnalytics::LastInteractionAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ai_analytics_user_id")
                            .from(AiAnalytics::Table, AiAnalytics::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ai_analytics_course_id")
                            .from(AiAnalytics::Table, AiAnalytics::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AiAnalytics::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum AiAnalytics {
    Table,
    Id,
    UserId,
    CourseId,
    TotalSessions,
    TotalMessages,
    TotalTokens,
    LastInteractionAt,
}
