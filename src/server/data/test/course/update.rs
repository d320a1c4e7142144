use super::*;

/// Tests a partial course update.
///
/// Expected: only provided fields change
#[tokio::test]
async fn updates_only_provided_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_course_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let instructor = factory::create_instructor(db).await?;
    let course = factory::create_course(db, instructor.id).await?;

    let repo = CourseRepository::new(db);
    let updated = repo
        .update(
            course.id,
            UpdateCourseParams {
                title: Some("Renamed".to_string()),
                price: Some(19.5),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.price, 19.5);
    assert_eq!(updated.description, course.description);

    Ok(())
}

/// Tests publishing and storing curriculum totals.
///
/// Expected: published flag and totals persisted
#[tokio::test]
async fn publishes_and_updates_totals() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_course_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let instructor = factory::create_instructor(db).await?;
    let course = factory::create_course(db, instructor.id).await?;

    let repo = CourseRepository::new(db);
    repo.update_totals(course.id, 95, 4).await?;
    let published = repo.set_published(course.id, true).await?.unwrap();

    assert!(published.is_published);
    assert_eq!(published.total_duration, 95);
    assert_eq!(published.total_lessons, 4);
    assert_eq!(repo.count_published().await?, 1);

    Ok(())
}

/// Tests updating a missing course.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_course() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_course_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CourseRepository::new(db);

    assert!(repo
        .update(42, UpdateCourseParams::default())
        .await?
        .is_none());

    Ok(())
}
