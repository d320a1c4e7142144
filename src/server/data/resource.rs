//! Resource data repository.
//!
//! Resources hang off a course and optionally one of its lessons. Tags are stored
//! as a JSON array, so tag and free-text matching happens after loading.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::server::model::resource::{
    CreateResourceParams, Resource, ResourceSearch, UpdateResourceParams,
};

pub struct ResourceRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ResourceRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateResourceParams) -> Result<Resource, DbErr> {
        let entity = entity::resource::ActiveModel {
            course_id: ActiveValue::Set(params.course_id),
            lesson_id: ActiveValue::Set(params.lesson_id),
            title: ActiveValue::Set(params.title),
            description: ActiveValue::Set(params.description),
            resource_type: ActiveValue::Set(params.resource_type.as_str().to_string()),
            url: ActiveValue::Set(params.url),
            file_size: ActiveValue::Set(params.file_size),
            tags: ActiveValue::Set(serde_json::Value::from(params.tags)),
            uploaded_by: ActiveValue::Set(params.uploaded_by),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Resource::from_entity(entity))
    }

    pub async fn find_by_id(&self, resource_id: i32) -> Result<Option<Resource>, DbErr> {
        let entity = entity::prelude::Resource::find_by_id(resource_id)
            .one(self.db)
            .await?;

        Ok(entity.map(Resource::from_entity))
    }

    /// Gets every resource of a course, oldest first.
    pub async fn get_by_course(&self, course_id: i32) -> Result<Vec<Resource>, DbErr> {
        let entities = entity::prelude::Resource::find()
            .filter(entity::resource::Column::CourseId.eq(course_id))
            .order_by_asc(entity::resource::Column::CreatedAt)
            .order_by_asc(entity::resource::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Resource::from_entity).collect())
    }

    /// Gets resources of the given courses matching the search, newest first.
    ///
    /// Course and type filters run in SQL; text and tag filters run on the loaded
    /// rows against the decoded tag list.
    ///
    /// # Arguments
    /// - `course_ids` - Courses to search within (typically all published courses)
    /// - `search` - Text, tag, type and course filters
    ///
    /// # Returns
    /// - `Ok(Vec<Resource>)` - All matching resources
    /// - `Err(DbErr)` - Database error during query
    pub async fn search(
        &self,
        course_ids: Vec<i32>,
        search: &ResourceSearch,
    ) -> Result<Vec<Resource>, DbErr> {
        if course_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = entity::prelude::Resource::find()
            .filter(entity::resource::Column::CourseId.is_in(course_ids));

        if let Some(course_id) = search.course_id {
            query = query.filter(entity::resource::Column::CourseId.eq(course_id));
        }
        if let Some(resource_type) = search.resource_type {
            query = query.filter(entity::resource::Column::ResourceType.eq(resource_type.as_str()));
        }

        let resources = query
            .order_by_desc(entity::resource::Column::CreatedAt)
            .order_by_desc(entity::resource::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Resource::from_entity)
            .filter(|r| {
                search
                    .tag
                    .as_deref()
                    .is_none_or(|tag| r.tags.iter().any(|t| t == tag))
            })
            .filter(|r| search.query.as_deref().is_none_or(|q| r.matches_text(q)))
            .collect();

        Ok(resources)
    }

    /// Gets tag lists of every resource in the given courses.
    pub async fn get_tags_by_courses(&self, course_ids: Vec<i32>) -> Result<Vec<Vec<String>>, DbErr> {
        if course_ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = entity::prelude::Resource::find()
            .filter(entity::resource::Column::CourseId.is_in(course_ids))
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(|r| Resource::from_entity(r).tags)
            .collect())
    }

    pub async fn update(
        &self,
        resource_id: i32,
        params: UpdateResourceParams,
    ) -> Result<Option<Resource>, DbErr> {
        let Some(model) = entity::prelude::Resource::find_by_id(resource_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active = model.into_active_model();
        if let Some(lesson_id) = params.lesson_id {
            active.lesson_id = ActiveValue::Set(Some(lesson_id));
        }
        if let Some(title) = params.title {
            active.title = ActiveValue::Set(title);
        }
        if let Some(description) = params.description {
            active.description = ActiveValue::Set(Some(description));
        }
        if let Some(resource_type) = params.resource_type {
            active.resource_type = ActiveValue::Set(resource_type.as_str().to_string());
        }
        if let Some(url) = params.url {
            active.url = ActiveValue::Set(url);
        }
        if let Some(file_size) = params.file_size {
            active.file_size = ActiveValue::Set(Some(file_size));
        }
        if let Some(tags) = params.tags {
            active.tags = ActiveValue::Set(serde_json::Value::from(tags));
        }

        let updated = active.update(self.db).await?;
        Ok(Some(Resource::from_entity(updated)))
    }

    pub async fn delete(&self, resource_id: i32) -> Result<(), DbErr> {
        entity::prelude::Resource::delete_by_id(resource_id)
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn delete_by_lessons(&self, lesson_ids: Vec<i32>) -> Result<(), DbErr> {
        if lesson_ids.is_empty() {
            return Ok(());
        }

        entity::prelude::Resource::delete_many()
            .filter(entity::resource::Column::LessonId.is_in(lesson_ids))
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn delete_by_course(&self, course_id: i32) -> Result<(), DbErr> {
        entity::prelude::Resource::delete_many()
            .filter(entity::resource::Column::CourseId.eq(course_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn delete_by_uploader(&self, user_id: i32) -> Result<(), DbErr> {
        entity::prelude::Resource::delete_many()
            .filter(entity::resource::Column::UploadedBy.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(())
    }
}
