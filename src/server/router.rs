//! Route table, OpenAPI document and HTTP layers.

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{delete, get, post, put},
    Router,
};
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    config::Config,
    controller::{
        admin, ai, application, auth, course, curriculum, dashboard, download, enrollment, health,
        media, resource, review,
    },
    error::{config::ConfigError, AppError},
    state::AppState,
};

/// Headroom for multipart framing on top of the configured file size limit.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

#[derive(OpenApi)]
#[openapi(
    info(title = "Learning Sphere API", description = "Courses, learning resources and an AI study assistant"),
    paths(
        health::health,
        auth::register,
        auth::login,
        auth::get_me,
        auth::update_profile,
        auth::change_password,
        auth::forgot_password,
        auth::reset_password,
        auth::get_achievements,
        admin::get_users,
        admin::get_user,
        admin::update_user_role,
        admin::update_user_status,
        admin::delete_user,
        admin::get_analytics,
        course::get_courses,
        course::get_my_courses,
        course::get_enrolled_courses,
        course::create_course,
        course::get_course,
        course::update_course,
        course::delete_course,
        course::publish_course,
        curriculum::create_section,
        curriculum::update_section,
        curriculum::delete_section,
        curriculum::create_lesson,
        curriculum::update_lesson,
        curriculum::delete_lesson,
        enrollment::enroll,
        enrollment::unenroll,
        enrollment::update_progress,
        enrollment::get_learners,
        review::get_reviews,
        review::create_review,
        review::delete_review,
        resource::get_course_resources,
        resource::create_resource,
        resource::update_resource,
        resource::delete_resource,
        resource::search_resources,
        resource::get_tags,
        download::record_download,
        download::get_my_downloads,
        download::get_course_downloads,
        download::get_download_stats,
        application::submit_application,
        application::get_my_application,
        application::get_applications,
        application::approve_application,
        application::reject_application,
        ai::create_session,
        ai::get_sessions,
        ai::get_session,
        ai::send_message,
        ai::delete_session,
        ai::get_analytics,
        dashboard::get_learner_dashboard,
        dashboard::get_instructor_dashboard,
        dashboard::get_admin_dashboard,
        media::upload_media,
        media::upload_avatar,
        media::delete_media,
    ),
    modifiers(&BearerSecurity),
)]
pub struct ApiDoc;

/// Registers the `bearer` JWT scheme referenced by protected endpoints.
struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// Builds the application router.
///
/// AI routes are wrapped in a per-client rate limiter when
/// `AI_RATE_LIMIT_PER_MINUTE` is non-zero. Media uploads get a body limit sized
/// to `MEDIA_MAX_UPLOAD_BYTES`.
///
/// # Returns
/// - `Ok(Router)` - Router ready for `with_state`
/// - `Err(AppError::ConfigErr)` - CORS origin or rate limit cannot be used
pub fn router(config: &Config) -> Result<Router<AppState>, AppError> {
    let api = Router::new()
        .route("/api/health", get(health::health))
        .merge(auth_routes())
        .merge(admin_routes())
        .merge(course_routes())
        .merge(resource_routes())
        .merge(download_routes())
        .merge(application_routes())
        .merge(dashboard_routes())
        .merge(media_routes(config.media_max_upload_bytes))
        .merge(ai_routes(config.ai_rate_limit_per_minute)?);

    let docs = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi());

    Ok(api
        .merge(docs)
        .layer(cors_layer(config.cors_origin.as_deref())?)
        .layer(TraceLayer::new_for_http()))
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/me", get(auth::get_me))
        .route("/api/auth/profile", put(auth::update_profile))
        .route("/api/auth/password", put(auth::change_password))
        .route("/api/auth/forgot-password", post(auth::forgot_password))
        .route("/api/auth/reset-password", post(auth::reset_password))
        .route("/api/auth/achievements", get(auth::get_achievements))
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/api/admin/users", get(admin::get_users))
        .route(
            "/api/admin/users/{user_id}",
            get(admin::get_user).delete(admin::delete_user),
        )
        .route("/api/admin/users/{user_id}/role", put(admin::update_user_role))
        .route(
            "/api/admin/users/{user_id}/status",
            put(admin::update_user_status),
        )
        .route("/api/admin/analytics", get(admin::get_analytics))
}

fn course_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/courses",
            get(course::get_courses).post(course::create_course),
        )
        .route("/api/courses/mine", get(course::get_my_courses))
        .route("/api/courses/enrolled", get(course::get_enrolled_courses))
        .route(
            "/api/courses/{course_id}",
            get(course::get_course)
                .put(course::update_course)
                .delete(course::delete_course),
        )
        .route(
            "/api/courses/{course_id}/publish",
            put(course::publish_course),
        )
        .route(
            "/api/courses/{course_id}/sections",
            post(curriculum::create_section),
        )
        .route(
            "/api/courses/{course_id}/sections/{section_id}",
            put(curriculum::update_section).delete(curriculum::delete_section),
        )
        .route(
            "/api/courses/{course_id}/sections/{section_id}/lessons",
            post(curriculum::create_lesson),
        )
        .route(
            "/api/courses/{course_id}/sections/{section_id}/lessons/{lesson_id}",
            put(curriculum::update_lesson).delete(curriculum::delete_lesson),
        )
        .route(
            "/api/courses/{course_id}/enroll",
            post(enrollment::enroll).delete(enrollment::unenroll),
        )
        .route(
            "/api/courses/{course_id}/progress",
            put(enrollment::update_progress),
        )
        .route(
            "/api/courses/{course_id}/learners",
            get(enrollment::get_learners),
        )
        .route(
            "/api/courses/{course_id}/reviews",
            get(review::get_reviews).post(review::create_review),
        )
        .route(
            "/api/courses/{course_id}/reviews/{review_id}",
            delete(review::delete_review),
        )
}

fn resource_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/courses/{course_id}/resources",
            get(resource::get_course_resources).post(resource::create_resource),
        )
        .route(
            "/api/courses/{course_id}/resources/{resource_id}",
            put(resource::update_resource).delete(resource::delete_resource),
        )
        .route("/api/resources", get(resource::search_resources))
        .route("/api/resources/tags", get(resource::get_tags))
}

fn download_routes() -> Router<AppState> {
    Router::new()
        .route("/api/resource-downloads", post(download::record_download))
        .route("/api/resource-downloads/mine", get(download::get_my_downloads))
        .route(
            "/api/resource-downloads/course/{course_id}",
            get(download::get_course_downloads),
        )
        .route(
            "/api/resource-downloads/stats",
            get(download::get_download_stats),
        )
}

fn application_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/instructor-applications",
            get(application::get_applications).post(application::submit_application),
        )
        .route(
            "/api/instructor-applications/mine",
            get(application::get_my_application),
        )
        .route(
            "/api/instructor-applications/{user_id}/approve",
            put(application::approve_application),
        )
        .route(
            "/api/instructor-applications/{user_id}/reject",
            put(application::reject_application),
        )
}

fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/api/dashboard/learner", get(dashboard::get_learner_dashboard))
        .route(
            "/api/dashboard/instructor",
            get(dashboard::get_instructor_dashboard),
        )
        .route("/api/dashboard/admin", get(dashboard::get_admin_dashboard))
}

fn media_routes(max_upload_bytes: usize) -> Router<AppState> {
    let body_limit = DefaultBodyLimit::max(max_upload_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES));

    Router::new()
        .route(
            "/api/media/upload",
            post(media::upload_media).layer(body_limit.clone()),
        )
        .route(
            "/api/media/avatar",
            post(media::upload_avatar).layer(body_limit),
        )
        .route(
            "/api/media/{*public_id}",
            delete(media::delete_media),
        )
}

fn ai_routes(rate_limit_per_minute: u32) -> Result<Router<AppState>, AppError> {
    let routes = Router::new()
        .route(
            "/api/ai/sessions",
            get(ai::get_sessions).post(ai::create_session),
        )
        .route(
            "/api/ai/sessions/{session_id}",
            get(ai::get_session).delete(ai::delete_session),
        )
        .route(
            "/api/ai/sessions/{session_id}/messages",
            post(ai::send_message),
        )
        .route("/api/ai/analytics", get(ai::get_analytics));

    if rate_limit_per_minute == 0 {
        return Ok(routes);
    }

    let replenish_ms = (60_000 / u64::from(rate_limit_per_minute)).max(1);
    let governor = GovernorConfigBuilder::default()
        .key_extractor(SmartIpKeyExtractor)
        .per_millisecond(replenish_ms)
        .burst_size(rate_limit_per_minute)
        .finish()
        .ok_or_else(|| ConfigError::InvalidEnvVar {
            name: "AI_RATE_LIMIT_PER_MINUTE".to_string(),
            value: rate_limit_per_minute.to_string(),
        })?;

    Ok(routes.layer(GovernorLayer::new(governor)))
}

fn cors_layer(origin: Option<&str>) -> Result<CorsLayer, AppError> {
    let allow_origin = match origin {
        Some(origin) => {
            let value = HeaderValue::from_str(origin).map_err(|_| ConfigError::InvalidEnvVar {
                name: "CORS_ORIGIN".to_string(),
                value: origin.to_string(),
            })?;
            AllowOrigin::exact(value)
        }
        None => AllowOrigin::from(Any),
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]))
}
