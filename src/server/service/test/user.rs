use super::*;
use crate::server::{model::user::Role, service::user::UserService};

/// Tests that admins cannot change their own role or disable themselves.
///
/// Expected: BadRequest for both
#[tokio::test]
async fn admin_cannot_modify_self() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let admin = factory::user::create_admin(db).await?;
    let service = UserService::new(db);

    let role = service.set_role(admin.id, admin.id, Role::Learner).await;
    assert!(matches!(role, Err(AppError::BadRequest(_))));

    let status = service.set_active(admin.id, admin.id, false).await;
    assert!(matches!(status, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests promoting another user.
///
/// Expected: Ok(Some) with the new role
#[tokio::test]
async fn admin_sets_role_of_other_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let admin = factory::user::create_admin(db).await?;
    let learner = factory::user::create_learner(db).await?;

    let updated = UserService::new(db)
        .set_role(admin.id, learner.id, Role::Instructor)
        .await?
        .unwrap();

    assert_eq!(updated.role, Role::Instructor);

    Ok(())
}

/// Tests that users owning courses cannot be deleted.
///
/// Expected: BadRequest
#[tokio::test]
async fn delete_rejects_course_owner() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let admin = factory::user::create_admin(db).await?;
    let instructor = factory::user::create_instructor(db).await?;
    factory::create_course(db, instructor.id).await?;

    let result = UserService::new(db).delete(admin.id, instructor.id).await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests that deleting a learner removes their enrollments and reviews.
///
/// Expected: Ok(true) with dependent rows gone
#[tokio::test]
async fn delete_removes_learner_data() -> Result<(), AppError> {
    use sea_orm::{EntityTrait, PaginatorTrait};

    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let admin = factory::user::create_admin(db).await?;
    let learner = factory::user::create_learner(db).await?;
    let (_, course, _, _) = factory::helpers::create_published_course_with_lesson(db).await?;
    factory::create_enrollment(db, learner.id, course.id).await?;
    factory::review::create_review(db, course.id, learner.id, 4).await?;

    let deleted = UserService::new(db).delete(admin.id, learner.id).await?;

    assert!(deleted);
    assert_eq!(entity::prelude::Enrollment::find().count(db).await?, 0);
    assert_eq!(entity::prelude::CourseReview::find().count(db).await?, 0);
    assert!(UserService::new(db).get_by_id(learner.id).await?.is_none());

    Ok(())
}

/// Tests deleting a missing user.
///
/// Expected: Ok(false)
#[tokio::test]
async fn delete_missing_user_returns_false() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let admin = factory::user::create_admin(db).await?;

    assert!(!UserService::new(db).delete(admin.id, 9999).await?);

    Ok(())
}
