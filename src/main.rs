use std::sync::Arc;
use tokio::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod chain;
mod config;
mod constants;
mod error;
mod geo;
mod models;
mod services;

use chain::{queries::TreasureQueries, sui_client::SuiClient};
use config::Config;
use services::{LocationTracker, TreasureSyncEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stashhunt_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    config.validate()?;

    tracing::info!("Starting Stashhunt sync core");
    tracing::info!("Network: {}", config.network);
    tracing::info!("Fullnode: {}", config.fullnode_url);

    // Wire the chain read path into the sync engine
    let client = SuiClient::new(config.fullnode_url.clone());
    let queries = Arc::new(TreasureQueries::new(client, config.package_id.clone()));
    let engine = Arc::new(TreasureSyncEngine::new(
        queries,
        Duration::from_secs(config.sync_interval_secs),
    ));

    // Without a platform location source, a fixed position from the
    // environment stands in for the live stream.
    if let Some(location) = config.fixed_player_location() {
        tracing::info!(
            "Using fixed player location {:.4}, {:.4}",
            location.lat,
            location.lng
        );
        let tracker = Arc::new(LocationTracker::new(engine.clone()));
        tracker.start(futures_util::stream::iter(vec![Ok(location)]));
    } else {
        tracing::warn!("No location source configured; proximity checks stay empty");
    }

    // Start background services
    tokio::spawn(services::start_background_services(engine.clone()));

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");
    engine.shutdown();

    Ok(())
}
