//! Course section repository.

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::server::model::curriculum::{Section, UpdateSectionParams};

pub struct SectionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SectionRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Appends a section after the course's existing sections.
    pub async fn create(&self, course_id: i32, title: String) -> Result<Section, DbErr> {
        let position = entity::prelude::CourseSection::find()
            .filter(entity::course_section::Column::CourseId.eq(course_id))
            .order_by_desc(entity::course_section::Column::Position)
            .one(self.db)
            .await?
            .map_or(0, |last| last.position.saturating_add(1));

        let entity = entity::course_section::ActiveModel {
            course_id: ActiveValue::Set(course_id),
            title: ActiveValue::Set(title),
            position: ActiveValue::Set(position),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Section::from_entity(entity))
    }

    pub async fn find_by_id(&self, section_id: i32) -> Result<Option<Section>, DbErr> {
        let entity = entity::prelude::CourseSection::find_by_id(section_id)
            .one(self.db)
            .await?;

        Ok(entity.map(Section::from_entity))
    }

    /// Gets a course's sections ordered by position.
    pub async fn get_by_course(&self, course_id: i32) -> Result<Vec<Section>, DbErr> {
        let entities = entity::prelude::CourseSection::find()
            .filter(entity::course_section::Column::CourseId.eq(course_id))
            .order_by_asc(entity::course_section::Column::Position)
            .order_by_asc(entity::course_section::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Section::from_entity).collect())
    }

    pub async fn update(
        &self,
        section_id: i32,
        params: UpdateSectionParams,
    ) -> Result<Option<Section>, DbErr> {
        let Some(model) = entity::prelude::CourseSection::find_by_id(section_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active = model.into_active_model();
        if let Some(title) = params.title {
            active.title = ActiveValue::Set(title);
        }
        if let Some(position) = params.position {
            active.position = ActiveValue::Set(position);
        }

        let updated = active.update(self.db).await?;
        Ok(Some(Section::from_entity(updated)))
    }

    pub async fn delete(&self, section_id: i32) -> Result<(), DbErr> {
        entity::prelude::CourseSection::delete_by_id(section_id)
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn delete_by_course(&self, course_id: i32) -> Result<(), DbErr> {
        entity::prelude::CourseSection::delete_many()
            .filter(entity::course_section::Column::CourseId.eq(course_id))
            .exec(self.db)
            .await?;

        Ok(())
    }
}
