use super::*;

/// Tests text, tag and type filters independently and combined.
///
/// Expected: each filter narrows results as documented
#[tokio::test]
async fn filters_by_text_tag_and_type() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_course_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let instructor = factory::create_instructor(db).await?;
    let course = factory::create_published_course(db, instructor.id).await?;
    let guide = factory::resource::ResourceFactory::new(db, course.id, instructor.id)
        .title("Borrow checker guide")
        .resource_type("pdf")
        .tags(&["rust", "memory"])
        .build()
        .await?;
    let talk = factory::resource::ResourceFactory::new(db, course.id, instructor.id)
        .title("Conference talk")
        .description("All about the borrow checker")
        .resource_type("video")
        .tags(&["rust"])
        .build()
        .await?;
    factory::resource::ResourceFactory::new(db, course.id, instructor.id)
        .title("Style sheet")
        .resource_type("pdf")
        .tags(&["css"])
        .build()
        .await?;

    let repo = ResourceRepository::new(db);
    let ids = |resources: Vec<crate::server::model::resource::Resource>| {
        resources.into_iter().map(|r| r.id).collect::<Vec<_>>()
    };

    let by_text = repo
        .search(
            vec![course.id],
            &ResourceSearch {
                query: Some("borrow".to_string()),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(ids(by_text), vec![talk.id, guide.id]);

    let by_tag = repo
        .search(
            vec![course.id],
            &ResourceSearch {
                tag: Some("memory".to_string()),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(ids(by_tag), vec![guide.id]);

    let by_type = repo
        .search(
            vec![course.id],
            &ResourceSearch {
                resource_type: Some(ResourceType::Video),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(ids(by_type), vec![talk.id]);

    let combined = repo
        .search(
            vec![course.id],
            &ResourceSearch {
                query: Some("borrow".to_string()),
                tag: Some("rust".to_string()),
                resource_type: Some(ResourceType::Pdf),
                course_id: None,
            },
        )
        .await?;
    assert_eq!(ids(combined), vec![guide.id]);

    Ok(())
}

/// Tests that resources outside the given courses are never returned.
///
/// Expected: only resources of the listed course
#[tokio::test]
async fn restricts_to_given_courses() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_course_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let instructor = factory::create_instructor(db).await?;
    let published = factory::create_published_course(db, instructor.id).await?;
    let draft = factory::create_course(db, instructor.id).await?;
    let visible = factory::create_resource(db, published.id, instructor.id).await?;
    factory::create_resource(db, draft.id, instructor.id).await?;

    let repo = ResourceRepository::new(db);
    let results = repo
        .search(vec![published.id], &ResourceSearch::default())
        .await?;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, visible.id);
    assert!(repo
        .search(Vec::new(), &ResourceSearch::default())
        .await?
        .is_empty());

    Ok(())
}
