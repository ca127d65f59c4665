use anyhow::Context;
use community_listings::ListingCategory;
use community_server::{build_router, logging, AppState, ServerConfig};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env().context("loading configuration")?;
    logging::init(config.log_json)?;

    if config.uses_development_secret() {
        warn!("COMMUNITY_JWT_SECRET is not set, using the development secret");
    }

    let state = AppState::in_memory(config.jwt.clone()).context("configuring sessions")?;
    if config.seed_categories {
        state
            .listings
            .seed_categories(ListingCategory::defaults())
            .await
            .context("seeding listing categories")?;
    }

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "community server listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("community server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
    }
}
