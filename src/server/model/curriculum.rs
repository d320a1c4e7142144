//! Section and lesson models.
//!
//! Sections and lessons are ordered by an explicit `position`. Lessons carry an
//! optional quiz stored as a JSON array on the lesson row.

use serde::{Deserialize, Serialize};

use crate::{
    model::course::{
        CreateLessonDto, LessonDto, QuizQuestionDto, SectionDto, UpdateLessonDto,
        UpdateSectionDto,
    },
    server::{
        error::AppError,
        model::resource::Resource,
        util::validate::{require_text, validate_url},
    },
};

/// Longest lesson accepted, in minutes.
pub const MAX_LESSON_DURATION: i32 = 10_000;
/// Highest position a section or lesson can be moved to.
pub const MAX_POSITION: i32 = 10_000;

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: i32,
    pub course_id: i32,
    pub title: String,
    pub position: i32,
}

impl Section {
    pub fn from_entity(entity: entity::course_section::Model) -> Self {
        Self {
            id: entity.id,
            course_id: entity.course_id,
            title: entity.title,
            position: entity.position,
        }
    }

    pub fn into_dto(self) -> SectionDto {
        SectionDto {
            id: self.id,
            title: self.title,
            position: self.position,
            lessons: Vec::new(),
        }
    }
}

/// Multiple choice question attached to a lesson.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

impl QuizQuestion {
    /// Validates a question: it needs text, at least two options and an in-range answer.
    pub fn from_dto(dto: QuizQuestionDto) -> Result<Self, AppError> {
        let question = require_text("Quiz question", &dto.question)?;
        if dto.options.len() < 2 {
            return Err(AppError::BadRequest(
                "Quiz questions need at least two options".to_string(),
            ));
        }
        if dto.correct_index >= dto.options.len() {
            return Err(AppError::BadRequest(
                "Quiz correct_index is out of range".to_string(),
            ));
        }

        Ok(Self {
            question,
            options: dto.options,
            correct_index: dto.correct_index,
        })
    }

    pub fn into_dto(self) -> QuizQuestionDto {
        QuizQuestionDto {
            question: self.question,
            options: self.options,
            correct_index: self.correct_index,
        }
    }

    /// Validates every question in a quiz.
    pub fn from_dtos(dtos: Vec<QuizQuestionDto>) -> Result<Vec<Self>, AppError> {
        dtos.into_iter().map(Self::from_dto).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Lesson {
    pub id: i32,
    pub course_id: i32,
    pub section_id: i32,
    pub title: String,
    pub content: Option<String>,
    pub video_url: Option<String>,
    pub duration: i32,
    pub position: i32,
    pub quiz: Vec<QuizQuestion>,
}

impl Lesson {
    /// Converts an entity at the repository boundary.
    ///
    /// A quiz column that does not decode is treated as an empty quiz.
    pub fn from_entity(entity: entity::lesson::Model) -> Self {
        let quiz = entity
            .quiz
            .and_then(|value| serde_json::from_value(value).ok())
            .unwrap_or_default();

        Self {
            id: entity.id,
            course_id: entity.course_id,
            section_id: entity.section_id,
            title: entity.title,
            content: entity.content,
            video_url: entity.video_url,
            duration: entity.duration,
            position: entity.position,
            quiz,
        }
    }

    pub fn into_dto(self, resources: Vec<Resource>) -> LessonDto {
        LessonDto {
            id: self.id,
            section_id: self.section_id,
            title: self.title,
            content: self.content,
            video_url: self.video_url,
            duration: self.duration,
            position: self.position,
            quiz: self.quiz.into_iter().map(QuizQuestion::into_dto).collect(),
            resources: resources.into_iter().map(Resource::into_dto).collect(),
        }
    }
}

/// Lesson with the resources attached to it.
#[derive(Debug, Clone)]
pub struct LessonWithResources {
    pub lesson: Lesson,
    pub resources: Vec<Resource>,
}

/// Section with its ordered lessons.
#[derive(Debug, Clone)]
pub struct SectionWithLessons {
    pub section: Section,
    pub lessons: Vec<LessonWithResources>,
}

impl SectionWithLessons {
    pub fn into_dto(self) -> SectionDto {
        let mut dto = self.section.into_dto();
        dto.lessons = self
            .lessons
            .into_iter()
            .map(|l| l.lesson.into_dto(l.resources))
            .collect();
        dto
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateSectionParams {
    pub title: Option<String>,
    pub position: Option<i32>,
}

impl UpdateSectionParams {
    pub fn from_dto(dto: UpdateSectionDto) -> Result<Self, AppError> {
        Ok(Self {
            title: dto.title.map(|t| require_text("Title", &t)).transpose()?,
            position: dto.position.map(validate_position).transpose()?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CreateLessonParams {
    pub title: String,
    pub content: Option<String>,
    pub video_url: Option<String>,
    pub duration: i32,
    pub quiz: Vec<QuizQuestion>,
}

impl CreateLessonParams {
    pub fn from_dto(dto: CreateLessonDto) -> Result<Self, AppError> {
        Ok(Self {
            title: require_text("Title", &dto.title)?,
            content: dto.content,
            video_url: dto.video_url.map(|u| validate_url(&u)).transpose()?,
            duration: validate_duration(dto.duration)?,
            quiz: QuizQuestion::from_dtos(dto.quiz.unwrap_or_default())?,
        })
    }
}

/// Partial lesson update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateLessonParams {
    pub title: Option<String>,
    pub content: Option<String>,
    pub video_url: Option<String>,
    pub duration: Option<i32>,
    pub position: Option<i32>,
    pub quiz: Option<Vec<QuizQuestion>>,
}

impl UpdateLessonParams {
    pub fn from_dto(dto: UpdateLessonDto) -> Result<Self, AppError> {
        Ok(Self {
            title: dto.title.map(|t| require_text("Title", &t)).transpose()?,
            content: dto.content,
            video_url: dto.video_url.map(|u| validate_url(&u)).transpose()?,
            duration: dto.duration.map(validate_duration).transpose()?,
            position: dto.position.map(validate_position).transpose()?,
            quiz: dto.quiz.map(QuizQuestion::from_dtos).transpose()?,
        })
    }
}

fn validate_duration(duration: i32) -> Result<i32, AppError> {
    if !(0..=MAX_LESSON_DURATION).contains(&duration) {
        return Err(AppError::BadRequest(format!(
            "Duration must be between 0 and {} minutes",
            MAX_LESSON_DURATION
        )));
    }
    Ok(duration)
}

fn validate_position(position: i32) -> Result<i32, AppError> {
    if !(0..=MAX_POSITION).contains(&position) {
        return Err(AppError::BadRequest(format!(
            "Position must be between 0 and {}",
            MAX_POSITION
        )));
    }
    Ok(position)
}
