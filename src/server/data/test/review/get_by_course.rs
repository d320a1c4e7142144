use super::*;

/// Tests listing reviews newest first with author names.
///
/// Expected: newest review first, names resolved
#[tokio::test]
async fn lists_newest_first_with_names() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_learning_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, course, _, _) = factory::helpers::create_published_course_with_lesson(db).await?;
    let ada = factory::user::UserFactory::new(db).name("Ada").build().await?;
    let alan = factory::user::UserFactory::new(db).name("Alan").build().await?;

    let repo = ReviewRepository::new(db);
    repo.create(
        CreateReviewParams {
            course_id: course.id,
            user_id: ada.id,
            rating: 4,
            comment: None,
        },
        ada.name.clone(),
    )
    .await?;
    factory::review::create_review(db, course.id, alan.id, 5).await?;

    let reviews = repo.get_by_course(course.id).await?;

    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0].user_name, "Alan");
    assert_eq!(reviews[1].user_name, "Ada");
    assert!(repo.exists(ada.id, course.id).await?);

    Ok(())
}
