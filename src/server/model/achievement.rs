use chrono::{DateTime, Utc};

use crate::model::user::AchievementDto;

/// Milestones awarded automatically by enrollment activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AchievementKind {
    FirstEnrollment,
    CourseCompleted,
    FiveCoursesCompleted,
}

impl AchievementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementKind::FirstEnrollment => "first_enrollment",
            AchievementKind::CourseCompleted => "course_completed",
            AchievementKind::FiveCoursesCompleted => "five_courses_completed",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AchievementKind::FirstEnrollment => "First Steps",
            AchievementKind::CourseCompleted => "Course Completed",
            AchievementKind::FiveCoursesCompleted => "Dedicated Learner",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AchievementKind::FirstEnrollment => "Enrolled in your first course",
            AchievementKind::CourseCompleted => "Completed a course",
            AchievementKind::FiveCoursesCompleted => "Completed five courses",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Achievement {
    pub id: i32,
    pub user_id: i32,
    pub kind: String,
    pub title: String,
    pub description: String,
    pub course_id: Option<i32>,
    pub earned_at: DateTime<Utc>,
}

impl Achievement {
    pub fn from_entity(entity: entity::user_achievement::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            kind: entity.kind,
            title: entity.title,
            description: entity.description,
            course_id: entity.course_id,
            earned_at: entity.earned_at,
        }
    }

    pub fn into_dto(self) -> AchievementDto {
        AchievementDto {
            id: self.id,
            kind: self.kind,
            title: self.title,
            description: self.description,
            course_id: self.course_id,
            earned_at: self.earned_at,
        }
    }
}
