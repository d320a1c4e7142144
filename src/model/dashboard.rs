use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{
    api::LabelCountDto,
    course::{CourseDto, EnrollmentDto},
    user::AchievementDto,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RecentEnrollmentDto {
    pub enrollment: EnrollmentDto,
    pub course: CourseDto,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LearnerDashboardDto {
    pub enrolled_count: u64,
    pub completed_count: u64,
    pub in_progress_count: u64,
    pub average_progress: f64,
    pub recent_enrollments: Vec<RecentEnrollmentDto>,
    pub achievements: Vec<AchievementDto>,
    pub download_count: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InstructorCourseSummaryDto {
    pub course_id: i32,
    pub title: String,
    pub is_published: bool,
    pub learners: u64,
    pub average_rating: Option<f64>,
    pub review_count: u64,
    pub downloads: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InstructorDashboardDto {
    pub course_count: u64,
    pub published_count: u64,
    pub total_learners: u64,
    pub average_rating: Option<f64>,
    pub total_reviews: u64,
    pub total_downloads: u64,
    pub courses: Vec<InstructorCourseSummaryDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CourseEnrollmentCountDto {
    pub course_id: i32,
    pub title: String,
    pub enrollments: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminDashboardDto {
    pub users_by_role: Vec<LabelCountDto>,
    pub active_users: u64,
    pub inactive_users: u64,
    pub total_courses: u64,
    pub published_courses: u64,
    pub total_enrollments: u64,
    pub completed_enrollments: u64,
    pub total_downloads: u64,
    pub pending_applications: u64,
    pub top_courses: Vec<CourseEnrollmentCountDto>,
}

/// Platform-wide statistics for the admin analytics view.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PlatformAnalyticsDto {
    pub users_by_role: Vec<LabelCountDto>,
    /// Signups per `YYYY-MM`, oldest month first, covering the last six months.
    pub signups_by_month: Vec<LabelCountDto>,
    pub courses_by_category: Vec<LabelCountDto>,
    pub top_courses: Vec<CourseEnrollmentCountDto>,
    pub downloads_by_type: Vec<LabelCountDto>,
}
