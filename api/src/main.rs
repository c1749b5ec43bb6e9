use actix_web::HttpServer;
use anyhow::Context;
use tracing_subscriber::EnvFilter;

use ns_api::{build_state, create_app};
use ns_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;
    tracing::info!(environment = %config.environment, "Starting Northstar API server");

    let missing = config.missing_settings();
    if !missing.is_empty() {
        tracing::warn!(missing = ?missing, "some providers are not configured; their endpoints will fail");
    }

    let state = build_state(&config)
        .await
        .context("failed to initialize services")?;

    state.limiters.start_sweeper(std::time::Duration::from_secs(300));

    let bind_address = config.server.bind_address();
    tracing::info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(state.clone()))
        .keep_alive(std::time::Duration::from_secs(config.server.keep_alive))
        .client_request_timeout(std::time::Duration::from_secs(config.server.request_timeout));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    Ok(())
}
