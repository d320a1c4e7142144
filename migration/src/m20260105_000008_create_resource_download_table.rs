use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260105_000001_create_user_table::User, m20260105_000002_create_course_table::Course,
    m20260105_000005_create_resource_table::Resource,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ResourceDownload::Table)
                    .if_not_exists()
                    .col(pk_auto(ResourceDownload::Id))
                    .col(integer(ResourceDownload::UserId))
                    .col(integer(ResourceDownload::CourseId))
                    .col(integer_null(ResourceDownload::ResourceId))
                    .col(string(ResourceDownload::ResourceTitle))
                    .col(string(ResourceDownload::ResourceType))
                    .col(string(ResourceDownload::ResourceUrl))
                    .col(string_null(ResourceDownload::IpAddress))
                    .col(string_null(ResourceDownload::UserAgent))
                    .col(
                        timestamp_with_time_zone(ResourceDownload::DownloadedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_resource_download_user_id")
                            .from(ResourceDownload::Table, ResourceDownload::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_resource_download_course_id")
                            .from(ResourceDownload::Table, ResourceDownload::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_resource_download_resource_id")
                            .from(ResourceDownload::Table, ResourceDownload::ResourceId)
                            .to(Resource::Table, Resource::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ResourceDownload::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ResourceDownload {
    Table,
    Id,
    UserId,
    CourseId,
    ResourceId,
    ResourceTitle,
    ResourceType,
    ResourceUrl,
    IpAddress,
    UserAgent,
    DownloadedAt,
}
