use sea_orm_migration::{prelude::*, schema::*};

use super::m20260105_000002_create_course_table::Course;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CourseSection::Table)
                    .if_not_exists()
                    .col(pk_auto(CourseSection::Id))
                    .col(integer(CourseSection::CourseId))
                    .col(string(CourseSection::Title))
                    .col(integer(CourseSection::Position))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_section_course_id")
                            .from(CourseSection::Table, CourseSection::CourseId)
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
            .drop_table(Table::drop().table(CourseSection::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum CourseSection {
    Table,
    Id,
    CourseId,
    Title,
    Position,
}
