use crate::server::{
    data::{lesson::LessonRepository, section::SectionRepository},
    model::curriculum::{CreateLessonParams, QuizQuestion, UpdateLessonParams, UpdateSectionParams},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod lesson;
mod section;
