use super::*;

/// Tests averaging ratings of a course.
///
/// Expected: average 4.0 over 2 reviews
#[tokio::test]
async fn averages_ratings() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_learning_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, course, _, _) = factory::helpers::create_published_course_with_lesson(db).await?;
    let first = factory::create_learner(db).await?;
    let second = factory::create_learner(db).await?;
    factory::review::create_review(db, course.id, first.id, 3).await?;
    factory::review::create_review(db, course.id, second.id, 5).await?;

    let repo = ReviewRepository::new(db);
    let summary = repo.rating_summary(course.id).await?;

    assert_eq!(summary.count, 2);
    assert_eq!(summary.average, Some(4.0));

    Ok(())
}

/// Tests a course without reviews.
///
/// Expected: no average, zero count
#[tokio::test]
async fn no_reviews_has_no_average() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_learning_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, course, _, _) = factory::helpers::create_published_course_with_lesson(db).await?;

    let repo = ReviewRepository::new(db);
    let summary = repo.rating_summary(course.id).await?;

    assert_eq!(summary.count, 0);
    assert_eq!(summary.average, None);

    Ok(())
}

/// Tests rating totals across several courses.
///
/// Expected: one row per reviewed course, unreviewed course absent
#[tokio::test]
async fn totals_per_course() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_learning_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (instructor, first, _, _) =
        factory::helpers::create_published_course_with_lesson(db).await?;
    let second = factory::create_published_course(db, instructor.id).await?;
    let quiet = factory::create_published_course(db, instructor.id).await?;
    let ada = factory::create_learner(db).await?;
    let grace = factory::create_learner(db).await?;
    factory::review::create_review(db, first.id, ada.id, 2).await?;
    factory::review::create_review(db, first.id, grace.id, 5).await?;
    factory::review::create_review(db, second.id, ada.id, 4).await?;

    let repo = ReviewRepository::new(db);
    let totals = repo
        .rating_totals(vec![first.id, second.id, quiet.id])
        .await?;

    assert_eq!(totals.len(), 2);
    assert_eq!(
        (totals[0].course_id, totals[0].rating_sum, totals[0].count),
        (first.id, 7, 2)
    );
    assert_eq!(totals[0].summary().average, Some(3.5));
    assert_eq!(
        (totals[1].course_id, totals[1].rating_sum, totals[1].count),
        (second.id, 4, 1)
    );

    Ok(())
}
