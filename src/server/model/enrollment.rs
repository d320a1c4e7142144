use chrono::{DateTime, Utc};

use crate::{
    model::course::{EnrolledCourseDto, EnrollmentDto, LearnerDto},
    server::model::course::Course,
};

/// Number of completed courses that earns the dedicated learner milestone.
pub const COMPLETIONS_FOR_MILESTONE: u64 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Enrollment {
    pub id: i32,
    pub user_id: i32,
    pub course_id: i32,
    pub progress: i32,
    pub completed: bool,
    pub enrolled_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub last_accessed_at: Option<DateTime<Utc>>,
}

impl Enrollment {
    pub fn from_entity(entity: entity::enrollment::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            course_id: entity.course_id,
            progress: entity.progress,
            completed: entity.completed,
            enrolled_at: entity.enrolled_at,
            completed_at: entity.completed_at,
            last_accessed_at: entity.last_accessed_at,
        }
    }

    pub fn into_dto(self) -> EnrollmentDto {
        EnrollmentDto {
            id: self.id,
            user_id: self.user_id,
            course_id: self.course_id,
            progress: self.progress,
            completed: self.completed,
            enrolled_at: self.enrolled_at,
            completed_at: self.completed_at,
            last_accessed_at: self.last_accessed_at,
        }
    }
}

/// Enrollment joined with its course.
#[derive(Debug, Clone)]
pub struct EnrolledCourse {
    pub enrollment: Enrollment,
    pub course: Course,
}

impl EnrolledCourse {
    pub fn into_dto(self) -> EnrolledCourseDto {
        EnrolledCourseDto {
            enrollment: self.enrollment.into_dto(),
            course: self.course.into_dto(),
        }
    }
}

/// Enrolled learner as seen by the course owner.
#[derive(Debug, Clone)]
pub struct Learner {
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub progress: i32,
    pub completed: bool,
    pub enrolled_at: DateTime<Utc>,
}

impl Learner {
    pub fn into_dto(self) -> LearnerDto {
        LearnerDto {
            user_id: self.user_id,
            name: self.name,
            email: self.email,
            progress: self.progress,
            completed: self.completed,
            enrolled_at: self.enrolled_at,
        }
    }
}

/// Result of a progress update, reporting whether this update completed the course.
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    pub enrollment: Enrollment,
    pub newly_completed: bool,
}
