use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(pk_auto(User::Id))
                    .col(string(User::Name))
                    .col(string_uniq(User::Email))
                    .col(string(User::PasswordHash))
                    .col(string(User::Role).default("learner"))
                    .col(text_null(User::Bio))
                    .col(string_null(User::AvatarUrl))
                    .col(boolean(User::IsActive).default(true))
                    .col(string_null(User::ResetTokenHash))
                    .col(timestamp_with_time_zone_null(User::ResetTokenExpiresAt))
                    .col(string(User::ApplicationStatus).default("none"))
                    .col(text_null(User::ApplicationMotivation))
                    .col(text_null(User::ApplicationExpertise))
                    .col(timestamp_with_time_zone_null(User::ApplicationSubmittedAt))
                    .col(timestamp_with_time_zone_null(User::ApplicationReviewedAt))
                    .col(integer_null(User::ApplicationReviewedBy))
                    .col(text_null(User::ApplicationRejectionReason))
                    .col(timestamp_with_time_zone_null(User::LastLoginAt))
                    .col(
                        timestamp_with_time_zone(User::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(User::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_reset_token_hash")
                    .table(User::Table)
                    .col(User::ResetTokenHash)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum User {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    Role,
    Bio,
    AvatarUrl,
    IsActive,
    ResetTokenHash,
    ResetTokenExpiresAt,
    ApplicationStatus,
    ApplicationMotivation,
    ApplicationExpertise,
    ApplicationSubmittedAt,
    ApplicationReviewedAt,
    ApplicationReviewedBy,
    ApplicationRejectionReason,
    LastLoginAt,
    CreatedAt,
    UpdatedAt,
}
