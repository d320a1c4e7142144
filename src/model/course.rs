use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::resource::ResourceDto;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CourseDto {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub category: String,
    pub level: String,
    pub price: f64,
    pub thumbnail_url: Option<String>,
    pub instructor_id: i32,
    pub is_published: bool,
    pub total_duration: i32,
    pub total_lessons: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedCoursesDto {
    pub courses: Vec<CourseDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateCourseDto {
    pub title: String,
    pub description: String,
    pub category: String,
    pub level: Option<String>,
    pub price: Option<f64>,
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateCourseDto {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub level: Option<String>,
    pub price: Option<f64>,
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PublishCourseDto {
    pub is_published: bool,
}

/// A course with its full curriculum and review summary.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CourseDetailDto {
    pub course: CourseDto,
    pub instructor_name: String,
    pub sections: Vec<SectionDto>,
    /// Resources attached to the course rather than a lesson.
    pub resources: Vec<ResourceDto>,
    pub learner_count: u64,
    pub average_rating: Option<f64>,
    pub review_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SectionDto {
    pub id: i32,
    pub title: String,
    pub position: i32,
    pub lessons: Vec<LessonDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LessonDto {
    pub id: i32,
    pub section_id: i32,
    pub title: String,
    pub content: Option<String>,
    pub video_url: Option<String>,
    pub duration: i32,
    pub position: i32,
    pub quiz: Vec<QuizQuestionDto>,
    pub resources: Vec<ResourceDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct QuizQuestionDto {
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateSectionDto {
    pub title: String,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateSectionDto {
    pub title: Option<String>,
    pub position: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateLessonDto {
    pub title: String,
    pub content: Option<String>,
    pub video_url: Option<String>,
    pub duration: i32,
    pub quiz: Option<Vec<QuizQuestionDto>>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateLessonDto {
    pub title: Option<String>,
    pub content: Option<String>,
    pub video_url: Option<String>,
    pub duration: Option<i32>,
    pub position: Option<i32>,
    pub quiz: Option<Vec<QuizQuestionDto>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EnrollmentDto {
    pub id: i32,
    pub user_id: i32,
    pub course_id: i32,
    pub progress: i32,
    pub completed: bool,
    pub enrolled_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub last_accessed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EnrolledCourseDto {
    pub enrollment: EnrollmentDto,
    pub course: CourseDto,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LearnerDto {
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub progress: i32,
    pub completed: bool,
    pub enrolled_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateProgressDto {
    pub progress: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReviewDto {
    pub id: i32,
    pub course_id: i32,
    pub user_id: i32,
    pub user_name: String,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateReviewDto {
    pub rating: i32,
    pub comment: Option<String>,
}
