use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260105_000002_create_course_table::Course,
    m20260105_000003_create_course_section_table::CourseSection,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Lesson::Table)
                    .if_not_exists()
                    .col(pk_auto(Lesson::Id))
                    .col(integer(Lesson::CourseId))
                    .col(integer(Lesson::SectionId))
                    .col(string(Lesson::Title))
                    .col(text_null(Lesson::Content))
                    .col(string_null(Lesson::VideoUrl))
                    .col(integer(Lesson::Duration).default(0))
                    .col(integer(Lesson::Position))
                    .col(json_null(Lesson::Quiz))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lesson_course_id")
                            .from(Lesson::Table, Lesson::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lesson_section_id")
                            .from(Lesson::Table, Lesson::SectionId)
                            .to(CourseSection::Table, CourseSection::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Lesson::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Lesson {
    Table,
    Id,
    CourseId,
    SectionId,
    Title,
    Content,
    VideoUrl,
    Duration,
    Position,
    Quiz,
}
