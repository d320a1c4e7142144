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
                    .table(AiChatSession::Table)
                    .if_not_exists()
                    .col(pk_auto(AiChatSession::Id))
                    .col(integer(AiChatSession::UserId))
                    .col(integer_null(AiChatSession::CourseId))
                    .col(string(AiChatSession::Title))
                    .col(boolean(AiChatSession::IsActive).default(true))
                    .col(
                        timestamp_with_time_zone(AiChatSession::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(AiChatSession::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ai_chat_session_user_id")
                            .from(AiChatSession::Table, AiChatSession::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ai_chat_session_course_id")
                            .from(AiChatSession::Table, AiChatSession::CourseId)
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
            .drop_table(Table::drop().table(AiChatSession::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum AiChatSession {
    Table,
    Id,
    UserId,
    CourseId,
    Title,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
