use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260105_000001_create_user_table::User, m20260105_000002_create_course_table::Course,
    m20260105_000004_create_lesson_table::Lesson,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Resource::Table)
                    .if_not_exists()
                    .col(pk_auto(Resource::Id))
                    .col(integer(Resource::CourseId))
                    .col(integer_null(Resource::LessonId))
                    .col(string(Resource::Title))
                    .col(text_null(Resource::Description))
                    .col(string(Resource::ResourceType))
                    .col(string(Resource::Url))
                    .col(big_integer_null(Resource::FileSize))
                    .col(json(Resource::Tags))
                    .col(integer(Resource::UploadedBy))
                    .col(
                        timestamp_with_time_zone(Resource::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_resource_course_id")
                            .from(Resource::Table, Resource::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_resource_lesson_id")
                            .from(Resource::Table, Resource::LessonId)
                            .to(Lesson::Table, Lesson::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_resource_uploaded_by")
                            .from(Resource::Table, Resource::UploadedBy)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_resource_resource_type")
                    .table(Resource::Table)
                    .col(Resource::ResourceType)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Resource::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Resource {
    Table,
    Id,
    CourseId,
    LessonId,
    Title,
    Description,
    ResourceType,
    Url,
    FileSize,
    Tags,
    UploadedBy,
    CreatedAt,
}
