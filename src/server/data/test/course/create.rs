use super::*;

/// Tests creating a course.
///
/// Verifies new courses start unpublished with zero curriculum totals.
///
/// Expected: Ok with unpublished course
#[tokio::test]
async fn creates_unpublished_course() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_course_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let instructor = factory::create_instructor(db).await?;
    let repo = CourseRepository::new(db);

    let course = repo
        .create(CreateCourseParams {
            instructor_id: instructor.id,
            title: "Rust Basics".to_string(),
            description: "Ownership and borrowing".to_string(),
            category: "programming".to_string(),
            level: CourseLevel::Beginner,
            price: 0.0,
            thumbnail_url: None,
        })
        .await?;

    assert!(!course.is_published);
    assert_eq!(course.level, "beginner");
    assert_eq!(course.total_duration, 0);
    assert_eq!(course.total_lessons, 0);
    assert_eq!(repo.count_by_instructor(instructor.id).await?, 1);

    Ok(())
}
