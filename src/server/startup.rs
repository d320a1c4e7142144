use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::server::{
    config::Config,
    data::user::UserRepository,
    error::AppError,
    provider::{ai::OpenAiClient, media::MediaHostClient},
    service::auth::AuthService,
    state::AppState,
    util::jwt::JwtKeys,
};

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then automatically runs all pending SeaORM migrations to ensure the database
/// schema is up-to-date. This function must complete successfully before the application can
/// access the database.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(Error)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the HTTP client shared by the AI and media providers.
pub fn setup_reqwest_client() -> reqwest::Client {
    reqwest::Client::new()
}

/// Creates the bootstrap admin account when no admin exists yet.
///
/// Uses `ADMIN_EMAIL` and `ADMIN_PASSWORD`. When either is unset and the database
/// has no admin, a warning is logged and startup continues.
///
/// # Arguments
/// - `db` - Database connection with migrations applied
/// - `config` - Application configuration holding the admin credentials
/// - `jwt` - Token keys required by the auth service
pub async fn check_for_admin(
    db: &DatabaseConnection,
    config: &Config,
    jwt: &JwtKeys,
) -> Result<(), AppError> {
    match (config.admin_email.as_deref(), config.admin_password.as_deref()) {
        (Some(email), Some(password)) => {
            AuthService::new(db, jwt).ensure_admin(email, password).await?;
        }
        _ => {
            if !UserRepository::new(db).admin_exists().await? {
                tracing::warn!(
                    "No admin account exists; set ADMIN_EMAIL and ADMIN_PASSWORD to create one"
                );
            }
        }
    }

    Ok(())
}

/// Assembles the shared application state.
///
/// The AI client is only attached when `AI_API_KEY` is set and the media client
/// only when both `MEDIA_HOST_URL` and `MEDIA_API_KEY` are set; otherwise the
/// matching endpoints answer 503.
pub fn build_state(
    db: DatabaseConnection,
    config: &Config,
    http_client: reqwest::Client,
) -> Result<AppState, AppError> {
    let jwt = JwtKeys::new(&config.jwt_secret, config.jwt_expiry_hours);
    let mut state = AppState::new(db, jwt, config.media_max_upload_bytes as u64)
        .with_reset_token_in_response(config.reset_token_in_response);

    match &config.ai_api_key {
        Some(api_key) => {
            state = state.with_ai(Arc::new(OpenAiClient::new(
                http_client.clone(),
                config.ai_api_url.clone(),
                api_key.clone(),
                config.ai_model.clone(),
            )));
        }
        None => tracing::warn!("AI_API_KEY not set; AI assistant is disabled"),
    }

    match (&config.media_host_url, &config.media_api_key) {
        (Some(url), Some(api_key)) => {
            state = state.with_media(Arc::new(MediaHostClient::new(
                http_client,
                url,
                api_key.clone(),
            )?));
        }
        _ => tracing::warn!("MEDIA_HOST_URL or MEDIA_API_KEY not set; media uploads are disabled"),
    }

    Ok(state)
}
