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
                    .table(UserAchievement::Table)
                    .if_not_exists()
                    .col(pk_auto(UserAchievement::Id))
                    .col(integer(UserAchievement::UserId))
                    .col(string(UserAchievement::Kind))
                    .col(string(UserAchievement::Title))
                    .col(string(UserAchievement::Description))
                    .col(integer_null(UserAchievement::CourseId))
                    .col(
                        timestamp_with_time_zone(UserAchievement::EarnedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_achievement_user_id")
                            .from(UserAchievement::Table, UserAchievement::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_achievement_course_id")
                            .from(UserAchievement::Table, UserAchievement::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserAchievement::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum UserAchievement {
    Table,
    Id,
    UserId,
    Kind,
    Title,
    Description,
    CourseId,
    EarnedAt,
}
