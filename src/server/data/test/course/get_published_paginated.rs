use super::*;

/// Tests that the catalog only lists published courses.
///
/// Expected: draft courses excluded from results and total
#[tokio::test]
async fn excludes_unpublished_courses() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_course_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let instructor = factory::create_instructor(db).await?;
    let published = factory::create_published_course(db, instructor.id).await?;
    factory::create_course(db, instructor.id).await?;

    let repo = CourseRepository::new(db);
    let (courses, total) = repo
        .get_published_paginated(&CourseFilter::default(), 0, 10)
        .await?;

    assert_eq!(total, 1);
    assert_eq!(courses[0].id, published.id);

    Ok(())
}

/// Tests catalog filters for category, level and text search.
///
/// Expected: each filter narrows to the matching course
#[tokio::test]
async fn filters_by_category_level_and_search() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_course_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let instructor = factory::create_instructor(db).await?;
    let rust = factory::course::CourseFactory::new(db, instructor.id)
        .title("Async Rust")
        .category("programming")
        .level("advanced")
        .published(true)
        .build()
        .await?;
    let design = factory::course::CourseFactory::new(db, instructor.id)
        .title("Colour Theory")
        .description("Palettes for the web")
        .category("design")
        .level("beginner")
        .published(true)
        .build()
        .await?;

    let repo = CourseRepository::new(db);

    let (by_category, _) = repo
        .get_published_paginated(
            &CourseFilter {
                category: Some("design".to_string()),
                ..Default::default()
            },
            0,
            10,
        )
        .await?;
    assert_eq!(by_category.len(), 1);
    assert_eq!(by_category[0].id, design.id);

    let (by_level, _) = repo
        .get_published_paginated(
            &CourseFilter {
                level: Some("advanced".to_string()),
                ..Default::default()
            },
            0,
            10,
        )
        .await?;
    assert_eq!(by_level.len(), 1);
    assert_eq!(by_level[0].id, rust.id);

    let (by_search, _) = repo
        .get_published_paginated(
            &CourseFilter {
                search: Some("palettes".to_string()),
                ..Default::default()
            },
            0,
            10,
        )
        .await?;
    assert_eq!(by_search.len(), 1);
    assert_eq!(by_search[0].id, design.id);

    Ok(())
}

/// Tests that an out-of-range page index returns an empty page.
///
/// Expected: no courses, total unaffected
#[tokio::test]
async fn far_page_is_empty() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_course_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let instructor = factory::create_instructor(db).await?;
    factory::create_published_course(db, instructor.id).await?;

    let (courses, total) = CourseRepository::new(db)
        .get_published_paginated(&CourseFilter::default(), u64::MAX, 100)
        .await?;

    assert!(courses.is_empty());
    assert_eq!(total, 1);

    Ok(())
}
