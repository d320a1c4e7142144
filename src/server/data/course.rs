//! Course data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    model::api::MAX_PAGE,
    server::model::{
        course::{Course, CourseFilter, CreateCourseParams, UpdateCourseParams},
        LabelCount,
    },
};

pub struct CourseRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CourseRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates an unpublished course with empty curriculum totals.
    pub async fn create(&self, params: CreateCourseParams) -> Result<Course, DbErr> {
        let now = Utc::now();
        let entity = entity::course::ActiveModel {
            title: ActiveValue::Set(params.title),
            description: ActiveValue::Set(params.description),
            category: ActiveValue::Set(params.category),
            level: ActiveValue::Set(params.level.as_str().to_string()),
            price: ActiveValue::Set(params.price),
            thumbnail_url: ActiveValue::Set(params.thumbnail_url),
            instructor_id: ActiveValue::Set(params.instructor_id),
            is_published: ActiveValue::Set(false),
            total_duration: ActiveValue::Set(0),
            total_lessons: ActiveValue::Set(0),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Course::from_entity(entity))
    }

    pub async fn find_by_id(&self, course_id: i32) -> Result<Option<Course>, DbErr> {
        let entity = entity::prelude::Course::find_by_id(course_id)
            .one(self.db)
            .await?;

        Ok(entity.map(Course::from_entity))
    }

    /// Gets published courses matching the filter, newest first.
    ///
    /// # Arguments
    /// - `filter` - Optional category, level and title/description search
    /// - `page` - Zero-based page number
    /// - `per_page` - Number of courses per page
    ///
    /// # Returns
    /// - `Ok((courses, total))` - Courses of the page and total matching courses
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn get_published_paginated(
        &self,
        filter: &CourseFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Course>, u64), DbErr> {
        let mut query = entity::prelude::Course::find()
            .filter(entity::course::Column::IsPublished.eq(true));

        if let Some(category) = filter.category.as_deref() {
            query = query.filter(entity::course::Column::Category.eq(category));
        }
        if let Some(level) = filter.level.as_deref() {
            query = query.filter(entity::course::Column::Level.eq(level));
        }
        if let Some(search) = filter.search.as_deref() {
            query = query.filter(
                Condition::any()
                    .add(entity::course::Column::Title.contains(search))
                    .add(entity::course::Column::Description.contains(search)),
            );
        }

        let paginator = query
            .order_by_desc(entity::course::Column::CreatedAt)
            .order_by_desc(entity::course::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let courses = paginator
            .fetch_page(page.min(MAX_PAGE))
            .await?
            .into_iter()
            .map(Course::from_entity)
            .collect();

        Ok((courses, total))
    }

    /// Gets courses owned by an instructor, newest first.
    pub async fn get_by_instructor(&self, instructor_id: i32) -> Result<Vec<Course>, DbErr> {
        let entities = entity::prelude::Course::find()
            .filter(entity::course::Column::InstructorId.eq(instructor_id))
            .order_by_desc(entity::course::Column::CreatedAt)
            .order_by_desc(entity::course::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Course::from_entity).collect())
    }

    pub async fn get_by_ids(&self, ids: Vec<i32>) -> Result<Vec<Course>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = entity::prelude::Course::find()
            .filter(entity::course::Column::Id.is_in(ids))
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Course::from_entity).collect())
    }

    /// Course count per category, largest first with ties by category name.
    pub async fn count_by_category(&self) -> Result<Vec<LabelCount>, DbErr> {
        let rows: Vec<(String, i64)> = entity::prelude::Course::find()
            .select_only()
            .column(entity::course::Column::Category)
            .column_as(entity::course::Column::Id.count(), "courses")
            .group_by(entity::course::Column::Category)
            .order_by_desc(entity::course::Column::Id.count())
            .order_by_asc(entity::course::Column::Category)
            .into_tuple()
            .all(self.db)
            .await?;

        Ok(rows.into_iter().map(LabelCount::from).collect())
    }

    /// Gets IDs of all published courses.
    pub async fn get_published_ids(&self) -> Result<Vec<i32>, DbErr> {
        let entities = entity::prelude::Course::find()
            .filter(entity::course::Column::IsPublished.eq(true))
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(|c| c.id).collect())
    }

    pub async fn count_by_instructor(&self, instructor_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Course::find()
            .filter(entity::course::Column::InstructorId.eq(instructor_id))
            .count(self.db)
            .await
    }

    /// Applies a partial update.
    ///
    /// # Returns
    /// - `Ok(Some(Course))` - Updated course
    /// - `Ok(None)` - Course does not exist
    /// - `Err(DbErr)` - Database error during update
    pub async fn update(
        &self,
        course_id: i32,
        params: UpdateCourseParams,
    ) -> Result<Option<Course>, DbErr> {
        let Some(model) = entity::prelude::Course::find_by_id(course_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active = model.into_active_model();
        if let Some(title) = params.title {
            active.title = ActiveValue::Set(title);
        }
        if let Some(description) = params.description {
            active.description = ActiveValue::Set(description);
        }
        if let Some(category) = params.category {
            active.category = ActiveValue::Set(category);
        }
        if let Some(level) = params.level {
            active.level = ActiveValue::Set(level.as_str().to_string());
        }
        if let Some(price) = params.price {
            active.price = ActiveValue::Set(price);
        }
        if let Some(thumbnail_url) = params.thumbnail_url {
            active.thumbnail_url = ActiveValue::Set(Some(thumbnail_url));
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        let updated = active.update(self.db).await?;
        Ok(Some(Course::from_entity(updated)))
    }

    pub async fn set_published(
        &self,
        course_id: i32,
        is_published: bool,
    ) -> Result<Option<Course>, DbErr> {
        let Some(model) = entity::prelude::Course::find_by_id(course_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active = model.into_active_model();
        active.is_published = ActiveValue::Set(is_published);
        active.updated_at = ActiveValue::Set(Utc::now());

        let updated = active.update(self.db).await?;
        Ok(Some(Course::from_entity(updated)))
    }

    /// Stores recomputed curriculum totals.
    pub async fn update_totals(
        &self,
        course_id: i32,
        total_duration: i32,
        total_lessons: i32,
    ) -> Result<(), DbErr> {
        let Some(model) = entity::prelude::Course::find_by_id(course_id)
            .one(self.db)
            .await?
        else {
            return Err(DbErr::RecordNotFound(format!(
                "Course {} not found",
                course_id
            )));
        };

        let mut active = model.into_active_model();
        active.total_duration = ActiveValue::Set(total_duration);
        active.total_lessons = ActiveValue::Set(total_lessons);
        active.updated_at = ActiveValue::Set(Utc::now());
        active.update(self.db).await?;

        Ok(())
    }

    /// Deletes the course row. Dependent rows must already be removed.
    pub async fn delete(&self, course_id: i32) -> Result<(), DbErr> {
        entity::prelude::Course::delete_by_id(course_id)
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn count_all(&self) -> Result<u64, DbErr> {
        entity::prelude::Course::find().count(self.db).await
    }

    pub async fn count_published(&self) -> Result<u64, DbErr> {
        entity::prelude::Course::find()
            .filter(entity::course::Column::IsPublished.eq(true))
            .count(self.db)
            .await
    }
}
