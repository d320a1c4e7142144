//! Shared helper utilities for factory methods.
//!
//! Provides unique ID generation and convenience methods for creating entities
//! together with their dependencies.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique values in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a published course owned by a fresh instructor with one section and one lesson.
///
/// The lesson lasts 30 minutes and the course totals are set to match it.
///
/// # Returns
/// - `Ok((instructor, course, section, lesson))` - Tuple of all created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_published_course_with_lesson(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::user::Model,
        entity::course::Model,
        entity::course_section::Model,
        entity::lesson::Model,
    ),
    DbErr,
> {
    let instructor = crate::factory::user::create_instructor(db).await?;
    let course = crate::factory::course::CourseFactory::new(db, instructor.id)
        .published(true)
        .total_duration(30)
        .total_lessons(1)
        .build()
        .await?;
    let section = crate::factory::section::create_section(db, course.id, 0).await?;
    let lesson = crate::factory::lesson::LessonFactory::new(db, course.id, section.id)
        .duration(30)
        .build()
        .await?;

    Ok((instructor, course, section, lesson))
}
