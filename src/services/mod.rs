// All service modules
pub mod game_actions;
pub mod location_tracker;
pub mod proof;
pub mod rate_limiter;
pub mod treasure_sync;

// Re-export for convenience
pub use game_actions::GameActions;
pub use location_tracker::LocationTracker;
pub use proof::{LocationProofGenerator, StubProofGenerator};
pub use rate_limiter::{CooldownStore, MemoryCooldownStore, RateLimiter};
pub use treasure_sync::{SyncPhase, TreasureSource, TreasureSyncEngine};

use crate::constants::STATUS_REPORT_INTERVAL_SECS;
use std::sync::Arc;
use tokio::time::Duration;

/// Start all background services
pub async fn start_background_services(engine: Arc<TreasureSyncEngine>) {
    tracing::info!("Starting background services...");

    engine.clone().start().await;

    // Periodic proximity report so headless runs have observable behavior.
    let report_engine = engine.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(STATUS_REPORT_INTERVAL_SECS));
        loop {
            ticker.tick().await;

            let treasures = report_engine.treasures().await;
            if report_engine.is_loading().await {
                tracing::debug!("Treasure sync still loading");
                continue;
            }
            match report_engine.nearby_treasure().await {
                Some(t) => tracing::info!(
                    "{} treasures tracked; in claim range of \"{}\"",
                    treasures.len(),
                    t.name
                ),
                None => tracing::debug!(
                    "{} treasures tracked; nothing in claim range",
                    treasures.len()
                ),
            }
        }
    });

    tracing::info!("All background services started successfully");
}
