use crate::server::{
    data::download::DownloadRepository,
    model::{download::ClientInfo, resource::Resource},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

/// Tests that a download snapshots the resource and client details.
///
/// Expected: record copies title, type and url
#[tokio::test]
async fn records_snapshot_of_resource() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_learning_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let learner = factory::create_learner(db).await?;
    let (instructor, course, _, _) =
        factory::helpers::create_published_course_with_lesson(db).await?;
    let resource = Resource::from_entity(
        factory::create_resource(db, course.id, instructor.id).await?,
    );

    let repo = DownloadRepository::new(db);
    let download = repo
        .create(
            learner.id,
            &resource,
            ClientInfo {
                ip_address: Some("203.0.113.7".to_string()),
                user_agent: Some("curl/8.0".to_string()),
            },
        )
        .await?;

    assert_eq!(download.resource_id, Some(resource.id));
    assert_eq!(download.resource_title, resource.title);
    assert_eq!(download.resource_type, "pdf");
    assert_eq!(download.resource_url, resource.url);
    assert_eq!(download.ip_address.as_deref(), Some("203.0.113.7"));

    Ok(())
}

/// Tests paginating a user's download history newest first.
///
/// Expected: total of 3, newest record on the first page
#[tokio::test]
async fn paginates_user_history() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_learning_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let learner = factory::create_learner(db).await?;
    let other = factory::create_learner(db).await?;
    let (instructor, course, _, _) =
        factory::helpers::create_published_course_with_lesson(db).await?;
    let resource = factory::create_resource(db, course.id, instructor.id).await?;
    factory::download::create_download(db, learner.id, &resource).await?;
    factory::download::create_download(db, learner.id, &resource).await?;
    let latest = factory::download::create_download(db, learner.id, &resource).await?;
    factory::download::create_download(db, other.id, &resource).await?;

    let repo = DownloadRepository::new(db);
    let (page, total) = repo.get_by_user_paginated(learner.id, 0, 2).await?;

    assert_eq!(total, 3);
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].id, latest.id);
    assert_eq!(repo.count_by_user(learner.id).await?, 3);
    assert_eq!(repo.count_all().await?, 4);

    Ok(())
}

/// Tests removing a course's download records.
///
/// Expected: no records remain for the course
#[tokio::test]
async fn deletes_by_course() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_learning_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let learner = factory::create_learner(db).await?;
    let (instructor, course, _, _) =
        factory::helpers::create_published_course_with_lesson(db).await?;
    let resource = factory::create_resource(db, course.id, instructor.id).await?;
    factory::download::create_download(db, learner.id, &resource).await?;

    let repo = DownloadRepository::new(db);
    repo.delete_by_course(course.id).await?;

    assert!(repo.get_by_course(course.id).await?.is_empty());

    Ok(())
}

/// Tests grouping downloads by type and by resource.
///
/// Expected: largest groups first, resource list cut at the limit
#[tokio::test]
async fn groups_by_type_and_resource() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_learning_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let learner = factory::create_learner(db).await?;
    let (instructor, course, _, _) =
        factory::helpers::create_published_course_with_lesson(db).await?;
    let pdf = factory::create_resource(db, course.id, instructor.id).await?;
    let video = factory::resource::ResourceFactory::new(db, course.id, instructor.id)
        .resource_type("video")
        .build()
        .await?;
    let slides = factory::create_resource(db, course.id, instructor.id).await?;
    for _ in 0..3 {
        factory::download::create_download(db, learner.id, &video).await?;
    }
    factory::download::create_download(db, learner.id, &pdf).await?;
    factory::download::create_download(db, learner.id, &pdf).await?;
    factory::download::create_download(db, learner.id, &slides).await?;

    let repo = DownloadRepository::new(db);
    let by_type: Vec<(String, u64)> = repo
        .count_by_type()
        .await?
        .into_iter()
        .map(|c| (c.label, c.count))
        .collect();
    let top = repo.most_downloaded(2).await?;
    let per_course = repo.count_by_courses(vec![course.id]).await?;

    assert_eq!(
        by_type,
        vec![("pdf".to_string(), 3), ("video".to_string(), 3)]
    );
    assert_eq!(top.len(), 2);
    assert_eq!((top[0].resource_id, top[0].count), (Some(video.id), 3));
    assert_eq!((top[1].resource_id, top[1].count), (Some(pdf.id), 2));
    assert_eq!(top[1].title, pdf.title);
    assert_eq!(per_course.get(&course.id), Some(&6));

    Ok(())
}
