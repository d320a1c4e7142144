use super::*;

fn lesson_params(title: &str, duration: i32) -> CreateLessonParams {
    CreateLessonParams {
        title: title.to_string(),
        content: None,
        video_url: None,
        duration,
        quiz: Vec::new(),
    }
}

/// Tests lesson totals across sections of a course.
///
/// Expected: summed duration and lesson count
#[tokio::test]
async fn sums_totals_for_course() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_course_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let instructor = factory::create_instructor(db).await?;
    let course = factory::create_course(db, instructor.id).await?;
    let intro = factory::create_section(db, course.id, 0).await?;
    let advanced = factory::create_section(db, course.id, 1).await?;

    let repo = LessonRepository::new(db);
    repo.create(course.id, intro.id, lesson_params("Hello", 15)).await?;
    repo.create(course.id, intro.id, lesson_params("Variables", 20)).await?;
    repo.create(course.id, advanced.id, lesson_params("Traits", 40)).await?;

    assert_eq!(repo.totals_for_course(course.id).await?, (75, 3));
    assert_eq!(repo.count_by_course(course.id).await?, 3);

    Ok(())
}

/// Tests that an empty course has zero totals.
///
/// Expected: (0, 0)
#[tokio::test]
async fn empty_course_has_zero_totals() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_course_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let instructor = factory::create_instructor(db).await?;
    let course = factory::create_course(db, instructor.id).await?;

    let repo = LessonRepository::new(db);

    assert_eq!(repo.totals_for_course(course.id).await?, (0, 0));

    Ok(())
}

/// Tests storing and replacing a lesson quiz.
///
/// Expected: quiz round-trips through the JSON column
#[tokio::test]
async fn stores_quiz() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_course_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let instructor = factory::create_instructor(db).await?;
    let course = factory::create_course(db, instructor.id).await?;
    let section = factory::create_section(db, course.id, 0).await?;

    let repo = LessonRepository::new(db);
    let lesson = repo
        .create(course.id, section.id, lesson_params("Ownership", 10))
        .await?;
    assert!(lesson.quiz.is_empty());

    let question = QuizQuestion {
        question: "Who owns a moved value?".to_string(),
        options: vec!["The caller".to_string(), "The callee".to_string()],
        correct_index: 1,
    };
    let updated = repo
        .update(
            lesson.id,
            UpdateLessonParams {
                quiz: Some(vec![question.clone()]),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.quiz, vec![question]);

    Ok(())
}

/// Tests removing all lessons of a section.
///
/// Expected: only the other section's lesson remains
#[tokio::test]
async fn deletes_by_section() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_course_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let instructor = factory::create_instructor(db).await?;
    let course = factory::create_course(db, instructor.id).await?;
    let doomed = factory::create_section(db, course.id, 0).await?;
    let kept = factory::create_section(db, course.id, 1).await?;
    factory::create_lesson(db, course.id, doomed.id).await?;
    let survivor = factory::create_lesson(db, course.id, kept.id).await?;

    let repo = LessonRepository::new(db);
    repo.delete_by_section(doomed.id).await?;

    let lessons = repo.get_by_course(course.id).await?;
    assert_eq!(lessons.len(), 1);
    assert_eq!(lessons[0].id, survivor.id);

    Ok(())
}

/// Tests that a new lesson is appended after the section's highest position.
///
/// Expected: position one past the moved lesson
#[tokio::test]
async fn appends_after_highest_position() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_course_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let instructor = factory::create_instructor(db).await?;
    let course = factory::create_course(db, instructor.id).await?;
    let section = factory::create_section(db, course.id, 0).await?;

    let repo = LessonRepository::new(db);
    let first = repo
        .create(course.id, section.id, lesson_params("Hello", 5))
        .await?;
    repo.create(course.id, section.id, lesson_params("Variables", 5))
        .await?;
    repo.update(
        first.id,
        UpdateLessonParams {
            position: Some(9),
            ..Default::default()
        },
    )
    .await?
    .unwrap();

    let last = repo
        .create(course.id, section.id, lesson_params("Closures", 5))
        .await?;

    assert_eq!(last.position, 10);
    let lessons = repo.get_by_course(course.id).await?;
    assert_eq!(lessons.last().map(|l| l.id), Some(last.id));

    Ok(())
}
