//! PriceDrop scraper service entry point

use anyhow::Result;
use pricedrop_scraper::{
    browser::ChromiumProvider,
    config,
    platforms::PlatformLoader,
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration before logging so `debug` can pick the level
    let settings_path = config::locate();
    let settings = config::load(settings_path.as_deref())?;

    // RUST_LOG wins over the configured level
    let default_level = if settings.general.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting PriceDrop scraper v{}", pricedrop_scraper::VERSION);
    match &settings_path {
        Some(path) => info!("Loaded settings from: {}", path.display()),
        None => info!("No settings file found, using defaults"),
    }
    info!("Loaded configuration for instance: {}", settings.general.instance_name);

    // Load platforms
    let registry = PlatformLoader::load(&settings)?;
    if registry.is_empty() {
        warn!("No platforms enabled, every search will be rejected");
    }

    // Launch the shared browser
    let provider = Arc::new(ChromiumProvider::launch(&settings.browser).await?);
    info!("Browser ready");

    let addr = SocketAddr::new(settings.server.bind_address.parse()?, settings.server.port);

    let state = AppState::new(settings, registry, provider.clone());
    let app = create_router(state);

    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    provider.shutdown().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
