//! Read-only statistics for the learner, instructor and admin dashboards.
//!
//! Counts and groupings are aggregated by the database; the results are
//! returned as response DTOs directly since they have no domain behavior of
//! their own.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    model::{
        api::LabelCountDto,
        dashboard::{
            AdminDashboardDto, CourseEnrollmentCountDto, InstructorCourseSummaryDto,
            InstructorDashboardDto, LearnerDashboardDto, PlatformAnalyticsDto,
            RecentEnrollmentDto,
        },
    },
    server::{
        data::{
            achievement::AchievementRepository, course::CourseRepository,
            download::DownloadRepository, enrollment::EnrollmentRepository,
            review::ReviewRepository, user::UserRepository,
        },
        error::AppError,
        model::{
            achievement::Achievement,
            average,
            enrollment::EnrolledCourse,
            review::RatingSummary,
            user::{ApplicationStatus, Role},
            LabelCount,
        },
        service::enrollment::EnrollmentService,
    },
};

const RECENT_ENROLLMENTS: usize = 5;
const ADMIN_TOP_COURSES: u64 = 5;
const ANALYTICS_TOP_COURSES: u64 = 10;
const SIGNUP_MONTHS: u32 = 6;

pub struct DashboardService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DashboardService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Learner progress overview.
    pub async fn learner(&self, user_id: i32) -> Result<LearnerDashboardDto, AppError> {
        let enrolled = EnrollmentService::new(self.db).get_enrolled(user_id).await?;

        let enrolled_count = enrolled.len() as u64;
        let completed_count = enrolled.iter().filter(|e| e.enrollment.completed).count() as u64;
        let progress: Vec<i32> = enrolled.iter().map(|e| e.enrollment.progress).collect();

        let recent_enrollments = enrolled
            .into_iter()
            .take(RECENT_ENROLLMENTS)
            .map(|EnrolledCourse { enrollment, course }| RecentEnrollmentDto {
                enrollment: enrollment.into_dto(),
                course: course.into_dto(),
            })
            .collect();

        let achievements = AchievementRepository::new(self.db)
            .get_by_user(user_id)
            .await?
            .into_iter()
            .map(Achievement::into_dto)
            .collect();
        let download_count = DownloadRepository::new(self.db)
            .count_by_user(user_id)
            .await?;

        Ok(LearnerDashboardDto {
            enrolled_count,
            completed_count,
            in_progress_count: enrolled_count - completed_count,
            average_progress: average(&progress).unwrap_or(0.0),
            recent_enrollments,
            achievements,
            download_count,
        })
    }

    /// Teaching overview across the instructor's own courses.
    pub async fn instructor(&self, instructor_id: i32) -> Result<InstructorDashboardDto, AppError> {
        let courses = CourseRepository::new(self.db)
            .get_by_instructor(instructor_id)
            .await?;
        let course_ids: Vec<i32> = courses.iter().map(|c| c.id).collect();

        let learners = EnrollmentRepository::new(self.db)
            .count_by_courses(course_ids.clone())
            .await?;
        let rating_totals = ReviewRepository::new(self.db)
            .rating_totals(course_ids.clone())
            .await?;
        let downloads = DownloadRepository::new(self.db)
            .count_by_courses(course_ids)
            .await?;

        let ratings: HashMap<i32, RatingSummary> = rating_totals
            .iter()
            .map(|totals| (totals.course_id, totals.summary()))
            .collect();
        let overall = RatingSummary::from_totals(
            rating_totals.iter().map(|t| t.rating_sum).sum(),
            rating_totals.iter().map(|t| t.count).sum(),
        );
        let published_count = courses.iter().filter(|c| c.is_published).count() as u64;

        let summaries = courses
            .iter()
            .map(|course| {
                let rating = ratings.get(&course.id).copied().unwrap_or_default();
                InstructorCourseSummaryDto {
                    course_id: course.id,
                    title: course.title.clone(),
                    is_published: course.is_published,
                    learners: learners.get(&course.id).copied().unwrap_or(0),
                    average_rating: rating.average,
                    review_count: rating.count,
                    downloads: downloads.get(&course.id).copied().unwrap_or(0),
                }
            })
            .collect();

        Ok(InstructorDashboardDto {
            course_count: courses.len() as u64,
            published_count,
            total_learners: learners.values().sum(),
            average_rating: overall.average,
            total_reviews: overall.count,
            total_downloads: downloads.values().sum(),
            courses: summaries,
        })
    }

    /// Platform totals for admins.
    pub async fn admin(&self) -> Result<AdminDashboardDto, AppError> {
        let user_repo = UserRepository::new(self.db);
        let course_repo = CourseRepository::new(self.db);
        let enrollment_repo = EnrollmentRepository::new(self.db);

        Ok(AdminDashboardDto {
            users_by_role: self.users_by_role().await?,
            active_users: user_repo.count_by_active(true).await?,
            inactive_users: user_repo.count_by_active(false).await?,
            total_courses: course_repo.count_all().await?,
            published_courses: course_repo.count_published().await?,
            total_enrollments: enrollment_repo.count_all().await?,
            completed_enrollments: enrollment_repo.count_completed().await?,
            total_downloads: DownloadRepository::new(self.db).count_all().await?,
            pending_applications: user_repo
                .count_applications(ApplicationStatus::Pending)
                .await?,
            top_courses: self.top_courses(ADMIN_TOP_COURSES).await?,
        })
    }

    /// Admin analytics: users by role, monthly signups over the last six months,
    /// courses per category, most enrolled courses and downloads per resource type.
    pub async fn platform_analytics(&self) -> Result<PlatformAnalyticsDto, AppError> {
        let now = Utc::now();
        let since = months_back_start(now, SIGNUP_MONTHS - 1)?;
        let signups = UserRepository::new(self.db)
            .get_signup_dates_since(since)
            .await?;

        Ok(PlatformAnalyticsDto {
            users_by_role: self.users_by_role().await?,
            signups_by_month: signups_by_month(now, &signups, SIGNUP_MONTHS),
            courses_by_category: into_dtos(
                CourseRepository::new(self.db).count_by_category().await?,
            ),
            top_courses: self.top_courses(ANALYTICS_TOP_COURSES).await?,
            downloads_by_type: into_dtos(DownloadRepository::new(self.db).count_by_type().await?),
        })
    }

    async fn users_by_role(&self) -> Result<Vec<LabelCountDto>, AppError> {
        let repo = UserRepository::new(self.db);
        let mut counts = Vec::new();
        for role in [Role::Learner, Role::Instructor, Role::Admin] {
            counts.push(LabelCountDto {
                label: role.as_str().to_string(),
                count: repo.count_by_role(role).await?,
            });
        }

        Ok(counts)
    }

    /// Courses with the most enrollments, ties broken by course id.
    async fn top_courses(&self, limit: u64) -> Result<Vec<CourseEnrollmentCountDto>, AppError> {
        let counts = EnrollmentRepository::new(self.db)
            .most_enrolled(limit)
            .await?;
        let titles: HashMap<i32, String> = CourseRepository::new(self.db)
            .get_by_ids(counts.iter().map(|(course_id, _)| *course_id).collect())
            .await?
            .into_iter()
            .map(|c| (c.id, c.title))
            .collect();

        Ok(counts
            .into_iter()
            .filter_map(|(course_id, enrollments)| {
                titles.get(&course_id).map(|title| CourseEnrollmentCountDto {
                    course_id,
                    title: title.clone(),
                    enrollments,
                })
            })
            .collect())
    }
}

fn into_dtos(counts: Vec<LabelCount>) -> Vec<LabelCountDto> {
    counts.into_iter().map(LabelCount::into_dto).collect()
}

/// `(year, month)` that lies `months` calendar months before `now`.
fn shift_month(now: DateTime<Utc>, months: u32) -> (i32, u32) {
    let index = now.year() * 12 + now.month0() as i32 - months as i32;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

/// Midnight UTC on the first day of the month `months` before `now`.
fn months_back_start(now: DateTime<Utc>, months: u32) -> Result<DateTime<Utc>, AppError> {
    let (year, month) = shift_month(now, months);

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| AppError::InternalError(format!("Invalid month {}-{}", year, month)))
}

/// Signup counts per `YYYY-MM` for the last `months` months, oldest first.
/// Months without signups are included with a zero count.
fn signups_by_month(
    now: DateTime<Utc>,
    signups: &[DateTime<Utc>],
    months: u32,
) -> Vec<LabelCountDto> {
    (0..months)
        .rev()
        .map(|back| {
            let (year, month) = shift_month(now, back);
            let count = signups
                .iter()
                .filter(|d| d.year() == year && d.month() == month)
                .count() as u64;

            LabelCountDto {
                label: format!("{:04}-{:02}", year, month),
                count,
            }
        })
        .collect()
}
