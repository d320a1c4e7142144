use crate::server::{
    data::course::CourseRepository,
    model::course::{CourseFilter, CourseLevel, CreateCourseParams, UpdateCourseParams},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod get_published_paginated;
mod update;
