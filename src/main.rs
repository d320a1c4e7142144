mod model;
mod server;

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

use crate::server::{config::Config, error::AppError, router::router, startup};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let http_client = startup::setup_reqwest_client();
    let state = startup::build_state(db.clone(), &config, http_client)?;

    startup::check_for_admin(&db, &config, &state.jwt).await?;

    let app = router(&config)?.with_state(state);

    let listener = TcpListener::bind(config.bind_address.as_str()).await?;
    tracing::info!("Server listening on {}", config.bind_address);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
