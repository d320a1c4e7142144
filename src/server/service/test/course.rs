use super::*;
use crate::server::{
    error::auth::AuthError,
    model::course::{CourseLevel, CreateCourseParams, UpdateCourseParams},
    service::course::CourseService,
};
use sea_orm::{EntityTrait, PaginatorTrait};

/// Tests that unpublished courses are hidden from everyone but the owner and admins.
///
/// Expected: NotFound for anonymous viewers and learners, Ok for owner and admin
#[tokio::test]
async fn unpublished_detail_visible_to_managers_only() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_learning_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let instructor = factory::user::create_instructor(db).await?;
    let learner = factory::user::create_learner(db).await?;
    let admin = factory::user::create_admin(db).await?;
    let course = factory::create_course(db, instructor.id).await?;
    let service = CourseService::new(db);

    assert!(matches!(
        service.get_detail(course.id, None).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        service.get_detail(course.id, Some(&learner)).await,
        Err(AppError::NotFound(_))
    ));
    service.get_detail(course.id, Some(&instructor)).await?;
    service.get_detail(course.id, Some(&admin)).await?;

    Ok(())
}

/// Tests that the detail tree places resources on their lessons and reports statistics.
///
/// Expected: lesson resource nested, course resource at top level, counts from enrollments and reviews
#[tokio::test]
async fn detail_builds_course_tree() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_learning_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (instructor, course, section, lesson) =
        factory::helpers::create_published_course_with_lesson(db).await?;
    factory::resource::ResourceFactory::new(db, course.id, instructor.id)
        .lesson_id(lesson.id)
        .title("Slides")
        .build()
        .await?;
    factory::resource::ResourceFactory::new(db, course.id, instructor.id)
        .title("Syllabus")
        .build()
        .await?;
    let learner = factory::user::create_learner(db).await?;
    factory::create_enrollment(db, learner.id, course.id).await?;
    factory::review::create_review(db, course.id, learner.id, 4).await?;

    let detail = CourseService::new(db).get_detail(course.id, None).await?;

    assert_eq!(detail.instructor_name, instructor.name);
    assert_eq!(detail.sections.len(), 1);
    assert_eq!(detail.sections[0].section.id, section.id);
    assert_eq!(detail.sections[0].lessons.len(), 1);
    assert_eq!(detail.sections[0].lessons[0].resources.len(), 1);
    assert_eq!(detail.sections[0].lessons[0].resources[0].title, "Slides");
    assert_eq!(detail.resources.len(), 1);
    assert_eq!(detail.resources[0].title, "Syllabus");
    assert_eq!(detail.learner_count, 1);
    assert_eq!(detail.review_count, 1);
    assert_eq!(detail.average_rating, Some(4.0));

    Ok(())
}

/// Tests that only the owner or an admin may update a course.
///
/// Expected: AccessDenied for another instructor, Ok for the owner
#[tokio::test]
async fn update_requires_owner_or_admin() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = factory::user::create_instructor(db).await?;
    let other = factory::user::create_instructor(db).await?;
    let course = factory::create_course(db, owner.id).await?;
    let service = CourseService::new(db);
    let params = UpdateCourseParams {
        title: Some("Renamed".to_string()),
        ..Default::default()
    };

    let denied = service.update(course.id, &other, params.clone()).await;
    assert!(matches!(
        denied,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    let updated = service.update(course.id, &owner, params).await?;
    assert_eq!(updated.title, "Renamed");

    Ok(())
}

/// Tests that a course needs a lesson before it can be published.
///
/// Expected: BadRequest without lessons, Ok once a lesson exists
#[tokio::test]
async fn publish_requires_lessons() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = factory::user::create_instructor(db).await?;
    let service = CourseService::new(db);
    let course = service
        .create(CreateCourseParams {
            instructor_id: owner.id,
            title: "Rust".to_string(),
            description: "Systems programming".to_string(),
            category: "programming".to_string(),
            level: CourseLevel::Beginner,
            price: 0.0,
            thumbnail_url: None,
        })
        .await?;

    let empty = service.set_published(course.id, &owner, true).await;
    assert!(matches!(empty, Err(AppError::BadRequest(_))));

    let section = factory::create_section(db, course.id, 0).await?;
    factory::create_lesson(db, course.id, section.id).await?;
    let published = service.set_published(course.id, &owner, true).await?;
    assert!(published.is_published);

    Ok(())
}

/// Tests that deleting a course removes its enrollments, downloads and curriculum.
///
/// Expected: no dependent rows remain
#[tokio::test]
async fn delete_cascades_to_dependents() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (instructor, course, _, _) =
        factory::helpers::create_published_course_with_lesson(db).await?;
    let resource = factory::create_resource(db, course.id, instructor.id).await?;
    let learner = factory::user::create_learner(db).await?;
    factory::create_enrollment(db, learner.id, course.id).await?;
    factory::download::create_download(db, learner.id, &resource).await?;
    factory::chat::ChatSessionFactory::new(db, learner.id)
        .course_id(course.id)
        .build()
        .await?;

    CourseService::new(db).delete(course.id, &instructor).await?;

    assert_eq!(entity::prelude::Course::find().count(db).await?, 0);
    assert_eq!(entity::prelude::Enrollment::find().count(db).await?, 0);
    assert_eq!(entity::prelude::ResourceDownload::find().count(db).await?, 0);
    assert_eq!(entity::prelude::Resource::find().count(db).await?, 0);
    assert_eq!(entity::prelude::Lesson::find().count(db).await?, 0);
    assert_eq!(entity::prelude::CourseSection::find().count(db).await?, 0);
    assert_eq!(entity::prelude::AiChatSession::find().count(db).await?, 0);

    Ok(())
}

/// Tests that a course delete failing part way leaves every row in place.
///
/// The schema lacks the AI chat tables, so the cascade fails after the
/// downloads and enrollments were already deleted inside the transaction.
///
/// Expected: DbErr, course, enrollment and download still present
#[tokio::test]
async fn failed_delete_rolls_back_cascade() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_learning_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (instructor, course, _, _) =
        factory::helpers::create_published_course_with_lesson(db).await?;
    let resource = factory::create_resource(db, course.id, instructor.id).await?;
    let learner = factory::user::create_learner(db).await?;
    factory::create_enrollment(db, learner.id, course.id).await?;
    factory::download::create_download(db, learner.id, &resource).await?;

    let result = CourseService::new(db).delete(course.id, &instructor).await;

    assert!(matches!(result, Err(AppError::DbErr(_))));
    assert_eq!(entity::prelude::Course::find().count(db).await?, 1);
    assert_eq!(entity::prelude::Enrollment::find().count(db).await?, 1);
    assert_eq!(entity::prelude::ResourceDownload::find().count(db).await?, 1);

    Ok(())
}
