//! Course resources and the cross-course resource library.

use sea_orm::DatabaseConnection;

use crate::{
    model::api::total_pages,
    server::{
        data::{course::CourseRepository, lesson::LessonRepository, resource::ResourceRepository},
        error::AppError,
        model::{
            count_labels,
            resource::{
                CreateResourceParams, PaginatedResources, Resource, ResourceSearch, TagCount,
                UpdateResourceParams,
            },
        },
        service::course::CourseService,
    },
};

pub struct ResourceService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ResourceService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets every resource of a course the user manages or is enrolled in.
    pub async fn get_by_course(
        &self,
        course_id: i32,
        user: &entity::user::Model,
    ) -> Result<Vec<Resource>, AppError> {
        CourseService::new(self.db)
            .get_accessible(course_id, user)
            .await?;

        Ok(ResourceRepository::new(self.db)
            .get_by_course(course_id)
            .await?)
    }

    /// Adds a resource to a course, optionally attached to one of its lessons.
    ///
    /// # Returns
    /// - `Ok(Resource)` - Created resource
    /// - `Err(AppError::BadRequest)` - Lesson does not belong to the course
    pub async fn create(
        &self,
        user: &entity::user::Model,
        params: CreateResourceParams,
    ) -> Result<Resource, AppError> {
        CourseService::new(self.db)
            .get_managed(params.course_id, user)
            .await?;
        self.check_lesson(params.course_id, params.lesson_id).await?;

        let resource = ResourceRepository::new(self.db).create(params).await?;

        tracing::info!(
            "User {} added resource {} to course {}",
            user.id,
            resource.id,
            resource.course_id
        );

        Ok(resource)
    }

    pub async fn update(
        &self,
        course_id: i32,
        resource_id: i32,
        user: &entity::user::Model,
        params: UpdateResourceParams,
    ) -> Result<Resource, AppError> {
        CourseService::new(self.db).get_managed(course_id, user).await?;
        self.find(course_id, resource_id).await?;
        self.check_lesson(course_id, params.lesson_id).await?;

        ResourceRepository::new(self.db)
            .update(resource_id, params)
            .await?
            .ok_or_else(resource_not_found)
    }

    pub async fn delete(
        &self,
        course_id: i32,
        resource_id: i32,
        user: &entity::user::Model,
    ) -> Result<(), AppError> {
        CourseService::new(self.db).get_managed(course_id, user).await?;
        self.find(course_id, resource_id).await?;

        ResourceRepository::new(self.db).delete(resource_id).await?;

        Ok(())
    }

    /// Finds a resource that belongs to the given course.
    pub async fn find(&self, course_id: i32, resource_id: i32) -> Result<Resource, AppError> {
        ResourceRepository::new(self.db)
            .find_by_id(resource_id)
            .await?
            .filter(|r| r.course_id == course_id)
            .ok_or_else(resource_not_found)
    }

    /// Searches resources of published courses, newest first.
    pub async fn search(
        &self,
        search: ResourceSearch,
        page: u64,
        per_page: u64,
    ) -> Result<PaginatedResources, AppError> {
        let course_ids = CourseRepository::new(self.db).get_published_ids().await?;
        let matches = ResourceRepository::new(self.db)
            .search(course_ids, &search)
            .await?;

        let total = matches.len() as u64;
        let offset = usize::try_from(page.saturating_mul(per_page)).unwrap_or(usize::MAX);
        let resources = matches
            .into_iter()
            .skip(offset)
            .take(usize::try_from(per_page).unwrap_or(usize::MAX))
            .collect();

        Ok(PaginatedResources {
            resources,
            total,
            page,
            per_page,
            total_pages: total_pages(total, per_page),
        })
    }

    /// Counts tag usage across published courses, most used first.
    pub async fn get_tag_counts(&self) -> Result<Vec<TagCount>, AppError> {
        let course_ids = CourseRepository::new(self.db).get_published_ids().await?;
        let tag_lists = ResourceRepository::new(self.db)
            .get_tags_by_courses(course_ids)
            .await?;

        let tags = count_labels(tag_lists.into_iter().flatten())
            .into_iter()
            .map(|c| TagCount {
                tag: c.label,
                count: c.count,
            })
            .collect();

        Ok(tags)
    }

    async fn check_lesson(&self, course_id: i32, lesson_id: Option<i32>) -> Result<(), AppError> {
        let Some(lesson_id) = lesson_id else {
            return Ok(());
        };

        let belongs = LessonRepository::new(self.db)
            .find_by_id(lesson_id)
            .await?
            .is_some_and(|l| l.course_id == course_id);
        if !belongs {
            return Err(AppError::BadRequest(
                "Lesson does not belong to this course".to_string(),
            ));
        }

        Ok(())
    }
}

fn resource_not_found() -> AppError {
    AppError::NotFound("Resource not found".to_string())
}
