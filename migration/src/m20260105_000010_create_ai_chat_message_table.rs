use sea_orm_migration::{prelude::*, schema::*};

use super::m20260105_000009_create_ai_chat_session_table::AiChatSession;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AiChatMessage::Table)
                    .if_not_exists()
                    .col(pk_auto(AiChatMessage::Id))
                    .col(integer(AiChatMessage::SessionId))
                    .col(string(AiChatMessage::Role))
                    .col(text(AiChatMessage::Content))
                    .col(
                        timestamp_with_time_zone(AiChatMessage::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ai_chat_message_session_id")
                            .from(AiChatMessage::Table, AiChatMessage::SessionId)
                            .to(AiChatSession::Table, AiChatSession::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AiChatMessage::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum AiChatMessage {
    Table,
    Id,
    SessionId,
    Role,
    Content,
    CreatedAt,
}
