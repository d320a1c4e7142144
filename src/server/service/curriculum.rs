//! Sections and lessons of a course.
//!
//! Every mutation recomputes the course's lesson count and total duration in the
//! same transaction as the change itself.

use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{
        course::CourseRepository, lesson::LessonRepository, resource::ResourceRepository,
        section::SectionRepository,
    },
    error::AppError,
    model::curriculum::{
        CreateLessonParams, Lesson, Section, UpdateLessonParams, UpdateSectionParams,
    },
    service::course::CourseService,
};

pub struct CurriculumService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CurriculumService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Appends a section to the course.
    pub async fn create_section(
        &self,
        course_id: i32,
        user: &entity::user::Model,
        title: String,
    ) -> Result<Section, AppError> {
        CourseService::new(self.db).get_managed(course_id, user).await?;

        Ok(SectionRepository::new(self.db).create(course_id, title).await?)
    }

    pub async fn update_section(
        &self,
        course_id: i32,
        section_id: i32,
        user: &entity::user::Model,
        params: UpdateSectionParams,
    ) -> Result<Section, AppError> {
        CourseService::new(self.db).get_managed(course_id, user).await?;
        self.find_section(course_id, section_id).await?;

        SectionRepository::new(self.db)
            .update(section_id, params)
            .await?
            .ok_or_else(section_not_found)
    }

    /// Deletes a section with its lessons and their resources.
    pub async fn delete_section(
        &self,
        course_id: i32,
        section_id: i32,
        user: &entity::user::Model,
    ) -> Result<(), AppError> {
        CourseService::new(self.db).get_managed(course_id, user).await?;
        self.find_section(course_id, section_id).await?;

        let txn = self.db.begin().await?;

        let lesson_repo = LessonRepository::new(&txn);
        let lesson_ids = lesson_repo.get_ids_by_section(section_id).await?;
        ResourceRepository::new(&txn)
            .delete_by_lessons(lesson_ids)
            .await?;
        lesson_repo.delete_by_section(section_id).await?;
        SectionRepository::new(&txn).delete(section_id).await?;
        refresh_totals(&txn, course_id).await?;

        txn.commit().await?;

        Ok(())
    }

    /// Appends a lesson to a section of the course.
    pub async fn create_lesson(
        &self,
        course_id: i32,
        section_id: i32,
        user: &entity::user::Model,
        params: CreateLessonParams,
    ) -> Result<Lesson, AppError> {
        CourseService::new(self.db).get_managed(course_id, user).await?;
        self.find_section(course_id, section_id).await?;

        let txn = self.db.begin().await?;

        let lesson = LessonRepository::new(&txn)
            .create(course_id, section_id, params)
            .await?;
        refresh_totals(&txn, course_id).await?;

        txn.commit().await?;

        Ok(lesson)
    }

    pub async fn update_lesson(
        &self,
        course_id: i32,
        section_id: i32,
        lesson_id: i32,
        user: &entity::user::Model,
        params: UpdateLessonParams,
    ) -> Result<Lesson, AppError> {
        CourseService::new(self.db).get_managed(course_id, user).await?;
        self.find_lesson(course_id, section_id, lesson_id).await?;

        let txn = self.db.begin().await?;

        let lesson = LessonRepository::new(&txn)
            .update(lesson_id, params)
            .await?
            .ok_or_else(lesson_not_found)?;
        refresh_totals(&txn, course_id).await?;

        txn.commit().await?;

        Ok(lesson)
    }

    /// Deletes a lesson and the resources attached to it.
    pub async fn delete_lesson(
        &self,
        course_id: i32,
        section_id: i32,
        lesson_id: i32,
        user: &entity::user::Model,
    ) -> Result<(), AppError> {
        CourseService::new(self.db).get_managed(course_id, user).await?;
        self.find_lesson(course_id, section_id, lesson_id).await?;

        let txn = self.db.begin().await?;

        ResourceRepository::new(&txn)
            .delete_by_lessons(vec![lesson_id])
            .await?;
        LessonRepository::new(&txn).delete(lesson_id).await?;
        refresh_totals(&txn, course_id).await?;

        txn.commit().await?;

        Ok(())
    }

    async fn find_section(&self, course_id: i32, section_id: i32) -> Result<Section, AppError> {
        SectionRepository::new(self.db)
            .find_by_id(section_id)
            .await?
            .filter(|s| s.course_id == course_id)
            .ok_or_else(section_not_found)
    }

    async fn find_lesson(
        &self,
        course_id: i32,
        section_id: i32,
        lesson_id: i32,
    ) -> Result<Lesson, AppError> {
        LessonRepository::new(self.db)
            .find_by_id(lesson_id)
            .await?
            .filter(|l| l.course_id == course_id && l.section_id == section_id)
            .ok_or_else(lesson_not_found)
    }
}

/// Stores the course's lesson count and total duration.
///
/// # Returns
/// - `Ok(())` - Totals updated
/// - `Err(AppError::BadRequest)` - Totals no longer fit the course columns
async fn refresh_totals<C: ConnectionTrait>(db: &C, course_id: i32) -> Result<(), AppError> {
    let (duration, lessons) = LessonRepository::new(db)
        .totals_for_course(course_id)
        .await?;

    let (Ok(duration), Ok(lessons)) = (i32::try_from(duration), i32::try_from(lessons)) else {
        return Err(AppError::BadRequest(
            "Course curriculum is too large".to_string(),
        ));
    };

    CourseRepository::new(db)
        .update_totals(course_id, duration, lessons)
        .await?;

    tracing::debug!(
        "Course {} totals: {} lessons, {} minutes",
        course_id,
        lessons,
        duration
    );

    Ok(())
}

fn section_not_found() -> AppError {
    AppError::NotFound("Section not found".to_string())
}

fn lesson_not_found() -> AppError {
    AppError::NotFound("Lesson not found".to_string())
}
