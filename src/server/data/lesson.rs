//! Lesson repository.

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::curriculum::{
    CreateLessonParams, Lesson, QuizQuestion, UpdateLessonParams,
};

pub struct LessonRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> LessonRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Appends a lesson after the section's existing lessons.
    pub async fn create(
        &self,
        course_id: i32,
        section_id: i32,
        params: CreateLessonParams,
    ) -> Result<Lesson, DbErr> {
        let position = entity::prelude::Lesson::find()
            .filter(entity::lesson::Column::SectionId.eq(section_id))
            .order_by_desc(entity::lesson::Column::Position)
            .one(self.db)
            .await?
            .map_or(0, |last| last.position.saturating_add(1));

        let entity = entity::lesson::ActiveModel {
            course_id: ActiveValue::Set(course_id),
            section_id: ActiveValue::Set(section_id),
            title: ActiveValue::Set(params.title),
            content: ActiveValue::Set(params.content),
            video_url: ActiveValue::Set(params.video_url),
            duration: ActiveValue::Set(params.duration),
            position: ActiveValue::Set(position),
            quiz: ActiveValue::Set(quiz_to_json(&params.quiz)?),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Lesson::from_entity(entity))
    }

    pub async fn find_by_id(&self, lesson_id: i32) -> Result<Option<Lesson>, DbErr> {
        let entity = entity::prelude::Lesson::find_by_id(lesson_id)
            .one(self.db)
            .await?;

        Ok(entity.map(Lesson::from_entity))
    }

    /// Gets all lessons of a course ordered by position within their section.
    pub async fn get_by_course(&self, course_id: i32) -> Result<Vec<Lesson>, DbErr> {
        let entities = entity::prelude::Lesson::find()
            .filter(entity::lesson::Column::CourseId.eq(course_id))
            .order_by_asc(entity::lesson::Column::Position)
            .order_by_asc(entity::lesson::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Lesson::from_entity).collect())
    }

    pub async fn get_ids_by_section(&self, section_id: i32) -> Result<Vec<i32>, DbErr> {
        let entities = entity::prelude::Lesson::find()
            .filter(entity::lesson::Column::SectionId.eq(section_id))
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(|l| l.id).collect())
    }

    pub async fn count_by_course(&self, course_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Lesson::find()
            .filter(entity::lesson::Column::CourseId.eq(course_id))
            .count(self.db)
            .await
    }

    /// Sums lesson durations and counts lessons of a course.
    ///
    /// Both values are 64-bit so large curricula cannot overflow the sum.
    ///
    /// # Returns
    /// - `Ok((total_duration, total_lessons))`
    pub async fn totals_for_course(&self, course_id: i32) -> Result<(i64, i64), DbErr> {
        let totals = entity::prelude::Lesson::find()
            .select_only()
            .column_as(entity::lesson::Column::Duration.sum(), "total_duration")
            .column_as(entity::lesson::Column::Id.count(), "total_lessons")
            .filter(entity::lesson::Column::CourseId.eq(course_id))
            .into_tuple::<(Option<i64>, i64)>()
            .one(self.db)
            .await?;

        Ok(totals.map_or((0, 0), |(duration, lessons)| {
            (duration.unwrap_or(0), lessons)
        }))
    }

    pub async fn update(
        &self,
        lesson_id: i32,
        params: UpdateLessonParams,
    ) -> Result<Option<Lesson>, DbErr> {
        let Some(model) = entity::prelude::Lesson::find_by_id(lesson_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active = model.into_active_model();
        if let Some(title) = params.title {
            active.title = ActiveValue::Set(title);
        }
        if let Some(content) = params.content {
            active.content = ActiveValue::Set(Some(content));
        }
        if let Some(video_url) = params.video_url {
            active.video_url = ActiveValue::Set(Some(video_url));
        }
        if let Some(duration) = params.duration {
            active.duration = ActiveValue::Set(duration);
        }
        if let Some(position) = params.position {
            active.position = ActiveValue::Set(position);
        }
        if let Some(quiz) = params.quiz {
            active.quiz = ActiveValue::Set(quiz_to_json(&quiz)?);
        }

        let updated = active.update(self.db).await?;
        Ok(Some(Lesson::from_entity(updated)))
    }

    pub async fn delete(&self, lesson_id: i32) -> Result<(), DbErr> {
        entity::prelude::Lesson::delete_by_id(lesson_id)
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn delete_by_section(&self, section_id: i32) -> Result<(), DbErr> {
        entity::prelude::Lesson::delete_many()
            .filter(entity::lesson::Column::SectionId.eq(section_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn delete_by_course(&self, course_id: i32) -> Result<(), DbErr> {
        entity::prelude::Lesson::delete_many()
            .filter(entity::lesson::Column::CourseId.eq(course_id))
            .exec(self.db)
            .await?;

        Ok(())
    }
}

/// Empty quizzes are stored as NULL.
fn quiz_to_json(quiz: &[QuizQuestion]) -> Result<Option<serde_json::Value>, DbErr> {
    if quiz.is_empty() {
        return Ok(None);
    }

    serde_json::to_value(quiz)
        .map(Some)
        .map_err(|e| DbErr::Custom(format!("Failed to encode quiz: {}", e)))
}
