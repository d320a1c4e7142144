use super::*;

/// Tests that new sections are appended after existing ones.
///
/// Expected: positions 0 and 1, listed in order
#[tokio::test]
async fn appends_sections_in_order() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_course_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let instructor = factory::create_instructor(db).await?;
    let course = factory::create_course(db, instructor.id).await?;

    let repo = SectionRepository::new(db);
    let first = repo.create(course.id, "Getting started".to_string()).await?;
    let second = repo.create(course.id, "Going further".to_string()).await?;

    assert_eq!(first.position, 0);
    assert_eq!(second.position, 1);

    let sections = repo.get_by_course(course.id).await?;
    assert_eq!(
        sections.iter().map(|s| s.id).collect::<Vec<_>>(),
        vec![first.id, second.id]
    );

    Ok(())
}

/// Tests moving a section changes the listing order.
///
/// Expected: moved section listed first
#[tokio::test]
async fn reorders_on_position_update() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_course_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let instructor = factory::create_instructor(db).await?;
    let course = factory::create_course(db, instructor.id).await?;
    let first = factory::create_section(db, course.id, 1).await?;
    let second = factory::create_section(db, course.id, 2).await?;

    let repo = SectionRepository::new(db);
    repo.update(
        second.id,
        UpdateSectionParams {
            title: None,
            position: Some(0),
        },
    )
    .await?
    .unwrap();

    let sections = repo.get_by_course(course.id).await?;
    assert_eq!(sections[0].id, second.id);
    assert_eq!(sections[1].id, first.id);

    Ok(())
}

/// Tests that a new section lands after a section moved to a high position.
///
/// Expected: new section positioned after the moved one and listed last
#[tokio::test]
async fn appends_after_moved_section() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_course_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let instructor = factory::create_instructor(db).await?;
    let course = factory::create_course(db, instructor.id).await?;

    let repo = SectionRepository::new(db);
    let basics = repo.create(course.id, "Basics".to_string()).await?;
    let borrowing = repo.create(course.id, "Borrowing".to_string()).await?;
    repo.update(
        basics.id,
        UpdateSectionParams {
            title: None,
            position: Some(5),
        },
    )
    .await?
    .unwrap();

    let lifetimes = repo.create(course.id, "Lifetimes".to_string()).await?;
    assert_eq!(lifetimes.position, 6);

    let sections = repo.get_by_course(course.id).await?;
    assert_eq!(
        sections.iter().map(|s| s.id).collect::<Vec<_>>(),
        vec![borrowing.id, basics.id, lifetimes.id]
    );

    Ok(())
}
