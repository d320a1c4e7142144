use std::net::SocketAddr;

use sea_orm::DatabaseConnection;
use tokio::net::TcpListener;

use crate::server::{
    config::Config, router::router, state::AppState, util::jwt::JwtKeys,
};

mod router;

const JWT_SECRET: &str = "router-test-secret";

fn config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        bind_address: "127.0.0.1:0".to_string(),
        cors_origin: None,
        jwt_secret: JWT_SECRET.to_string(),
        jwt_expiry_hours: 1,
        reset_token_in_response: true,
        ai_api_url: "http://127.0.0.1:9/unused".to_string(),
        ai_api_key: None,
        ai_model: "test-model".to_string(),
        ai_rate_limit_per_minute: 0,
        media_host_url: None,
        media_api_key: None,
        media_max_upload_bytes: 1024 * 1024,
        admin_email: None,
        admin_password: None,
    }
}

fn keys() -> JwtKeys {
    JwtKeys::new(JWT_SECRET, 1)
}

fn bearer(user: &entity::user::Model) -> String {
    format!("Bearer {}", keys().issue(user.id, &user.role).unwrap())
}

/// Serves the full router on an ephemeral port and returns its base URL.
async fn spawn_app(config: Config, db: DatabaseConnection) -> String {
    let state = AppState::new(db, keys(), config.media_max_upload_bytes as u64)
        .with_reset_token_in_response(config.reset_token_in_response);
    let app = router(&config).unwrap().with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = format!("http://{}", listener.local_addr().unwrap());

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });

    address
}
