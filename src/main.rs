use anyhow::Context;
use std::sync::Arc;
use tracing::{info, warn};

use silverpresta_api::app::app;
use silverpresta_api::config::{AppConfig, Environment};
use silverpresta_api::database::DatabaseManager;
use silverpresta_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    let config = Arc::new(AppConfig::from_env().context("invalid configuration")?);

    // Test runs stay quiet
    if !config.is_test() {
        let default_level = match config.environment {
            Environment::Development => "debug",
            _ => "info",
        };
        let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    info!("Starting SilverPresta API in {:?} mode", config.environment);

    let database = Arc::new(
        DatabaseManager::from_config(&config.database)
            .await
            .context("failed to initialize storage")?,
    );
    let state = AppState::new(config.clone(), database.clone());

    if let Some(admin) = &config.bootstrap {
        match state.users.ensure_admin(&admin.courriel, &admin.mot_de_passe).await {
            Ok(Some(user)) => info!("Bootstrap admin {} created", user.courriel),
            Ok(None) => {}
            Err(e) => warn!("Bootstrap admin not created: {}", e),
        }
    }

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("SilverPresta API listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    database.close().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
