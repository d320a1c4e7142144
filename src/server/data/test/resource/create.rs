use super::*;

/// Tests creating a lesson resource with tags.
///
/// Expected: tags round-trip through the JSON column
#[tokio::test]
async fn creates_resource_with_tags() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_course_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (instructor, course, _, lesson) =
        factory::helpers::create_published_course_with_lesson(db).await?;

    let repo = ResourceRepository::new(db);
    let resource = repo
        .create(CreateResourceParams {
            course_id: course.id,
            uploaded_by: instructor.id,
            lesson_id: Some(lesson.id),
            title: "Slides".to_string(),
            description: None,
            resource_type: ResourceType::Document,
            url: "https://cdn.example.com/slides.pptx".to_string(),
            file_size: Some(2048),
            tags: vec!["slides".to_string(), "intro".to_string()],
        })
        .await?;

    assert_eq!(resource.resource_type, "document");
    assert_eq!(resource.lesson_id, Some(lesson.id));
    assert_eq!(resource.tags, vec!["slides".to_string(), "intro".to_string()]);

    let listed = repo.get_by_course(course.id).await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, resource.id);
    assert_eq!(listed[0].tags, resource.tags);

    Ok(())
}

/// Tests removing resources attached to deleted lessons.
///
/// Expected: course-level resource kept
#[tokio::test]
async fn deletes_by_lessons() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_course_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (instructor, course, _, lesson) =
        factory::helpers::create_published_course_with_lesson(db).await?;
    factory::resource::ResourceFactory::new(db, course.id, instructor.id)
        .lesson_id(lesson.id)
        .build()
        .await?;
    let course_level = factory::create_resource(db, course.id, instructor.id).await?;

    let repo = ResourceRepository::new(db);
    repo.delete_by_lessons(vec![lesson.id]).await?;

    let remaining = repo.get_by_course(course.id).await?;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, course_level.id);

    Ok(())
}
