use std::collections::HashMap;

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::api::total_pages,
    server::{
        data::{
            ai::{AiAnalyticsRepository, ChatMessageRepository, ChatSessionRepository},
            course::CourseRepository,
            download::DownloadRepository,
            enrollment::EnrollmentRepository,
            lesson::LessonRepository,
            resource::ResourceRepository,
            review::ReviewRepository,
            section::SectionRepository,
            user::UserRepository,
        },
        error::{auth::AuthError, AppError},
        model::{
            course::{
                Course, CourseDetail, CourseFilter, CreateCourseParams, PaginatedCourses,
                UpdateCourseParams,
            },
            curriculum::{LessonWithResources, SectionWithLessons},
            resource::Resource,
        },
        service::is_admin,
    },
};

pub struct CourseService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CourseService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets published courses matching the catalog filter.
    pub async fn get_published(
        &self,
        filter: CourseFilter,
        page: u64,
        per_page: u64,
    ) -> Result<PaginatedCourses, AppError> {
        let (courses, total) = CourseRepository::new(self.db)
            .get_published_paginated(&filter, page, per_page)
            .await?;

        Ok(PaginatedCourses {
            courses,
            total,
            page,
            per_page,
            total_pages: total_pages(total, per_page),
        })
    }

    pub async fn get_by_instructor(&self, instructor_id: i32) -> Result<Vec<Course>, AppError> {
        Ok(CourseRepository::new(self.db)
            .get_by_instructor(instructor_id)
            .await?)
    }

    pub async fn create(&self, params: CreateCourseParams) -> Result<Course, AppError> {
        let course = CourseRepository::new(self.db).create(params).await?;

        tracing::info!(
            "Instructor {} created course {} '{}'",
            course.instructor_id,
            course.id,
            course.title
        );

        Ok(course)
    }

    /// Loads a course the user may manage.
    ///
    /// Course owners and admins manage a course; anyone else is denied.
    ///
    /// # Returns
    /// - `Ok(Course)` - The course
    /// - `Err(AppError::NotFound)` - Course does not exist
    /// - `Err(AppError::AuthErr(AccessDenied))` - User is neither owner nor admin
    pub async fn get_managed(
        &self,
        course_id: i32,
        user: &entity::user::Model,
    ) -> Result<Course, AppError> {
        let course = self.find(course_id).await?;

        if course.instructor_id != user.id && !is_admin(user) {
            return Err(AuthError::AccessDenied(
                user.id,
                format!("User is not allowed to manage course {}", course_id),
            )
            .into());
        }

        Ok(course)
    }

    /// Loads a course whose materials the user may access.
    ///
    /// Managers and enrolled learners have access.
    ///
    /// # Returns
    /// - `Ok(Course)` - The course
    /// - `Err(AppError::NotFound)` - Course does not exist
    /// - `Err(AppError::AuthErr(AccessDenied))` - User neither manages nor is enrolled in the course
    pub async fn get_accessible(
        &self,
        course_id: i32,
        user: &entity::user::Model,
    ) -> Result<Course, AppError> {
        let course = self.find(course_id).await?;

        if course.instructor_id == user.id || is_admin(user) {
            return Ok(course);
        }
        if EnrollmentRepository::new(self.db)
            .is_enrolled(user.id, course_id)
            .await?
        {
            return Ok(course);
        }

        Err(AuthError::AccessDenied(
            user.id,
            format!("User is not enrolled in course {}", course_id),
        )
        .into())
    }

    /// Builds the full course tree with enrollment and review statistics.
    ///
    /// Unpublished courses are reported as missing unless the viewer owns the
    /// course or is an admin.
    ///
    /// # Arguments
    /// - `course_id` - Course to load
    /// - `viewer` - Authenticated user, if any
    ///
    /// # Returns
    /// - `Ok(CourseDetail)` - Course with sections, lessons, resources and statistics
    /// - `Err(AppError::NotFound)` - Course missing or not visible to the viewer
    pub async fn get_detail(
        &self,
        course_id: i32,
        viewer: Option<&entity::user::Model>,
    ) -> Result<CourseDetail, AppError> {
        let course = self.find(course_id).await?;

        let can_manage =
            viewer.is_some_and(|user| user.id == course.instructor_id || is_admin(user));
        if !course.is_published && !can_manage {
            return Err(course_not_found());
        }

        let sections = SectionRepository::new(self.db)
            .get_by_course(course_id)
            .await?;
        let lessons = LessonRepository::new(self.db).get_by_course(course_id).await?;
        let resources = ResourceRepository::new(self.db)
            .get_by_course(course_id)
            .await?;

        let mut course_resources = Vec::new();
        let mut lesson_resources: HashMap<i32, Vec<Resource>> = HashMap::new();
        for resource in resources {
            match resource.lesson_id {
                Some(lesson_id) => lesson_resources.entry(lesson_id).or_default().push(resource),
                None => course_resources.push(resource),
            }
        }

        let mut section_lessons: HashMap<i32, Vec<LessonWithResources>> = HashMap::new();
        for lesson in lessons {
            let resources = lesson_resources.remove(&lesson.id).unwrap_or_default();
            section_lessons
                .entry(lesson.section_id)
                .or_default()
                .push(LessonWithResources { lesson, resources });
        }

        let sections = sections
            .into_iter()
            .map(|section| SectionWithLessons {
                lessons: section_lessons.remove(&section.id).unwrap_or_default(),
                section,
            })
            .collect();

        let instructor_name = UserRepository::new(self.db)
            .find_by_id(course.instructor_id)
            .await?
            .map(|u| u.name)
            .unwrap_or_else(|| "Unknown instructor".to_string());
        let learner_count = EnrollmentRepository::new(self.db)
            .count_by_course(course_id)
            .await?;
        let rating = ReviewRepository::new(self.db)
            .rating_summary(course_id)
            .await?;

        Ok(CourseDetail {
            course,
            instructor_name,
            sections,
            resources: course_resources,
            learner_count,
            average_rating: rating.average,
            review_count: rating.count,
        })
    }

    pub async fn update(
        &self,
        course_id: i32,
        user: &entity::user::Model,
        params: UpdateCourseParams,
    ) -> Result<Course, AppError> {
        self.get_managed(course_id, user).await?;

        CourseRepository::new(self.db)
            .update(course_id, params)
            .await?
            .ok_or_else(course_not_found)
    }

    /// Publishes or unpublishes a course.
    ///
    /// # Returns
    /// - `Ok(Course)` - Updated course
    /// - `Err(AppError::BadRequest)` - Publishing a course without lessons
    pub async fn set_published(
        &self,
        course_id: i32,
        user: &entity::user::Model,
        is_published: bool,
    ) -> Result<Course, AppError> {
        self.get_managed(course_id, user).await?;

        if is_published
            && LessonRepository::new(self.db)
                .count_by_course(course_id)
                .await?
                == 0
        {
            return Err(AppError::BadRequest(
                "Cannot publish a course without lessons".to_string(),
            ));
        }

        let course = CourseRepository::new(self.db)
            .set_published(course_id, is_published)
            .await?
            .ok_or_else(course_not_found)?;

        tracing::info!("Course {} published={}", course_id, is_published);

        Ok(course)
    }

    /// Deletes a course with its curriculum, enrollments, reviews, downloads and
    /// course-scoped AI chat data.
    pub async fn delete(&self, course_id: i32, user: &entity::user::Model) -> Result<(), AppError> {
        self.get_managed(course_id, user).await?;

        let txn = self.db.begin().await?;

        DownloadRepository::new(&txn).delete_by_course(course_id).await?;
        ReviewRepository::new(&txn).delete_by_course(course_id).await?;
        EnrollmentRepository::new(&txn)
            .delete_by_course(course_id)
            .await?;

        let sessions = ChatSessionRepository::new(&txn);
        let session_ids = sessions.get_ids_by_course(course_id).await?;
        ChatMessageRepository::new(&txn)
            .delete_by_sessions(session_ids.clone())
            .await?;
        sessions.delete_many(session_ids).await?;
        AiAnalyticsRepository::new(&txn)
            .delete_by_course(course_id)
            .await?;

        ResourceRepository::new(&txn).delete_by_course(course_id).await?;
        LessonRepository::new(&txn).delete_by_course(course_id).await?;
        SectionRepository::new(&txn).delete_by_course(course_id).await?;
        CourseRepository::new(&txn).delete(course_id).await?;

        txn.commit().await?;

        tracing::info!("User {} deleted course {}", user.id, course_id);

        Ok(())
    }

    async fn find(&self, course_id: i32) -> Result<Course, AppError> {
        CourseRepository::new(self.db)
            .find_by_id(course_id)
            .await?
            .ok_or_else(course_not_found)
    }
}

pub(super) fn course_not_found() -> AppError {
    AppError::NotFound("Course not found".to_string())
}
