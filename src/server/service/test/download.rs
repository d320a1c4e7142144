use super::*;
use crate::server::{
    model::download::{ClientInfo, RecordDownloadParams},
    service::download::DownloadService,
};

fn params(user_id: i32, course_id: i32, resource_id: i32) -> RecordDownloadParams {
    RecordDownloadParams {
        user_id,
        course_id,
        resource_id,
        client: ClientInfo {
            ip_address: Some("203.0.113.7".to_string()),
            user_agent: Some("test-agent".to_string()),
        },
    }
}

/// Tests recording a download by an enrolled learner.
///
/// Expected: record snapshots the resource and client details
#[tokio::test]
async fn records_download_for_enrolled_learner() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_learning_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (owner, course, _, _) = factory::helpers::create_published_course_with_lesson(db).await?;
    let resource = factory::create_resource(db, course.id, owner.id).await?;
    let learner = factory::user::create_learner(db).await?;
    factory::create_enrollment(db, learner.id, course.id).await?;

    let download = DownloadService::new(db)
        .record(&learner, params(learner.id, course.id, resource.id))
        .await?;

    assert_eq!(download.resource_id, Some(resource.id));
    assert_eq!(download.resource_url, resource.url);
    assert_eq!(download.ip_address.as_deref(), Some("203.0.113.7"));
    assert_eq!(download.user_agent.as_deref(), Some("test-agent"));

    Ok(())
}

/// Tests download access rules.
///
/// Expected: unenrolled learner denied, resource of another course NotFound
#[tokio::test]
async fn rejects_outsiders_and_foreign_resources() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_learning_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (owner, course, _, _) = factory::helpers::create_published_course_with_lesson(db).await?;
    let other_course = factory::create_published_course(db, owner.id).await?;
    let foreign = factory::create_resource(db, other_course.id, owner.id).await?;
    let resource = factory::create_resource(db, course.id, owner.id).await?;
    let learner = factory::user::create_learner(db).await?;
    let service = DownloadService::new(db);

    let outsider = service
        .record(&learner, params(learner.id, course.id, resource.id))
        .await;
    assert!(matches!(outsider, Err(AppError::AuthErr(_))));

    let mismatched = service
        .record(&owner, params(owner.id, course.id, foreign.id))
        .await;
    assert!(matches!(mismatched, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests download statistics.
///
/// Expected: totals, per-type counts and the most downloaded resource first
#[tokio::test]
async fn stats_group_by_type_and_resource() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_learning_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (owner, course, _, _) = factory::helpers::create_published_course_with_lesson(db).await?;
    let pdf = factory::create_resource(db, course.id, owner.id).await?;
    let video = factory::resource::ResourceFactory::new(db, course.id, owner.id)
        .resource_type("video")
        .build()
        .await?;
    let learner = factory::user::create_learner(db).await?;
    factory::download::create_download(db, learner.id, &pdf).await?;
    factory::download::create_download(db, learner.id, &pdf).await?;
    factory::download::create_download(db, learner.id, &video).await?;

    let stats = DownloadService::new(db).get_stats().await?;

    assert_eq!(stats.total, 3);
    assert_eq!(stats.by_type[0].label, "pdf");
    assert_eq!(stats.by_type[0].count, 2);
    assert_eq!(stats.top_resources[0].resource_id, Some(pdf.id));
    assert_eq!(stats.top_resources[0].count, 2);

    Ok(())
}
