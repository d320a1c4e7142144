use reqwest::StatusCode;
use serde_json::{json, Value};
use test_utils::{builder::TestBuilder, factory};

use super::{bearer, config, spawn_app};

#[tokio::test]
async fn health_reports_database_status() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let address = spawn_app(config(), db.clone()).await;

    let response = reqwest::get(format!("{}/api/health", address))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn registered_user_can_fetch_own_profile() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let address = spawn_app(config(), db.clone()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/auth/register", address))
        .json(&json!({
            "name": "Ada Lovelace",
            "email": "Ada@Example.com",
            "password": "analytical-engine"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    let token = body["token"].as_str().unwrap().to_string();

    let response = client
        .get(format!("{}/api/auth/me", address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let me: Value = response.json().await.unwrap();
    assert_eq!(me["email"], "ada@example.com");
    assert_eq!(me["role"], "learner");
}

#[tokio::test]
async fn profile_requires_token() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let address = spawn_app(config(), db.clone()).await;

    let response = reqwest::get(format!("{}/api/auth/me", address))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn catalog_lists_published_courses_only() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let instructor = factory::create_instructor(db).await.unwrap();
    let published = factory::create_published_course(db, instructor.id)
        .await
        .unwrap();
    factory::create_course(db, instructor.id).await.unwrap();
    let address = spawn_app(config(), db.clone()).await;

    let response = reqwest::get(format!("{}/api/courses", address))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["total"], 1);
    assert_eq!(body["courses"][0]["id"], published.id);
}

#[tokio::test]
async fn unpublished_course_is_hidden_from_anonymous_callers() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let instructor = factory::create_instructor(db).await.unwrap();
    let draft = factory::create_course(db, instructor.id).await.unwrap();
    let address = spawn_app(config(), db.clone()).await;
    let client = reqwest::Client::new();

    let anonymous = client
        .get(format!("{}/api/courses/{}", address, draft.id))
        .send()
        .await
        .unwrap();
    assert_eq!(anonymous.status(), StatusCode::NOT_FOUND);

    let owner = client
        .get(format!("{}/api/courses/{}", address, draft.id))
        .header("Authorization", bearer(&instructor))
        .send()
        .await
        .unwrap();
    assert_eq!(owner.status(), StatusCode::OK);
}

#[tokio::test]
async fn serves_openapi_document() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let address = spawn_app(config(), db.clone()).await;

    let response = reqwest::get(format!("{}/api-docs/openapi.json", address))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert!(body["paths"].get("/api/courses").is_some());
    assert!(body["components"]["securitySchemes"].get("bearer").is_some());
}

#[tokio::test]
async fn chat_without_completion_api_is_unavailable() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let learner = factory::create_learner(db).await.unwrap();
    let address = spawn_app(config(), db.clone()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/ai/sessions", address))
        .header("Authorization", bearer(&learner))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let session: Value = response.json().await.unwrap();
    let session_id = session["id"].as_i64().unwrap();

    let response = client
        .post(format!("{}/api/ai/sessions/{}/messages", address, session_id))
        .header("Authorization", bearer(&learner))
        .json(&json!({ "content": "What is ownership?" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn ai_routes_are_rate_limited() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let learner = factory::create_learner(db).await.unwrap();
    let mut config = config();
    config.ai_rate_limit_per_minute = 2;
    let address = spawn_app(config, db.clone()).await;
    let client = reqwest::Client::new();

    let mut statuses = Vec::new();
    for _ in 0..3 {
        let response = client
            .get(format!("{}/api/ai/analytics", address))
            .header("Authorization", bearer(&learner))
            .send()
            .await
            .unwrap();
        statuses.push(response.status());
    }

    assert_eq!(statuses[0], StatusCode::OK);
    assert_eq!(statuses[1], StatusCode::OK);
    assert_eq!(statuses[2], StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn rate_limit_leaves_other_routes_alone() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let mut config = config();
    config.ai_rate_limit_per_minute = 1;
    let address = spawn_app(config, db.clone()).await;

    for _ in 0..3 {
        let response = reqwest::get(format!("{}/api/health", address))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
