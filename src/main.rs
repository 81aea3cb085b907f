use anyhow::{Context, Result};
use std::net::SocketAddr;
use tracing::info;
use weather_web::{create_router_with_config, logging, AppConfig, LoggingConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; real deployments set the environment directly.
    dotenvy::dotenv().ok();

    // Logging comes up first so configuration failures reach the log sink.
    logging::init(&LoggingConfig::from_env())?;

    let config = AppConfig::from_env().unwrap_or_else(|err| logging::fatal(&err));
    let app = create_router_with_config(&config).unwrap_or_else(|err| logging::fatal(&err));

    let endpoint = &config.server.bind_addr;
    let listener = tokio::net::TcpListener::bind(endpoint)
        .await
        .with_context(|| format!("failed to bind {endpoint}"))
        .unwrap_or_else(|err| logging::fatal(&err));

    info!("Starting at endpoint:{}", endpoint);
    info!("Starting weather server v{}...", env!("CARGO_PKG_VERSION"));

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
