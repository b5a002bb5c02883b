use crate::{
    constants::CLAIM_RADIUS_METERS,
    error::Result,
    geo,
    models::{Location, Treasure},
};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{watch, RwLock};
use tokio::time::{interval, Duration};

/// Read seam the engine polls for the authoritative remote set.
#[async_trait]
pub trait TreasureSource: Send + Sync {
    async fn fetch_all_treasures(&self) -> Result<Vec<Treasure>>;
}

/// Engine lifecycle phase. Only the very first sync cycle gates the loading
/// indicator; later refreshes keep the engine in `Ready` whatever happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    Uninitialized,
    Loading,
    Ready,
}

// Seed entities shown when the chain has nothing for us yet.
fn seed_treasures() -> Vec<Treasure> {
    vec![Treasure {
        id: "0xMock1".to_string(),
        creator: "0x0".to_string(),
        name: "Demo Stash (Local)".to_string(),
        description: "A starter loot for demo purposes.".to_string(),
        lat: 40.7128,
        lng: -74.0060,
        is_claimed: false,
    }]
}

/// Treasure Sync Engine - Maintains an eventually-consistent local view of
/// on-chain treasure state and derives player proximity from it.
///
/// The remote set wholesale-replaces the local list whenever a fetch returns
/// at least one entity; empty and failed fetches fall back to the seed set
/// only while the list is empty, and retain the current list otherwise. An
/// optimistic insert racing a scheduled refresh can therefore be dropped
/// until the chain indexes it; accepted limitation of the sync model.
pub struct TreasureSyncEngine {
    source: Arc<dyn TreasureSource>,
    sync_interval: Duration,
    treasures: RwLock<Vec<Treasure>>,
    location: RwLock<Option<Location>>,
    phase: RwLock<SyncPhase>,
    shutdown_tx: watch::Sender<bool>,
}

impl TreasureSyncEngine {
    pub fn new(source: Arc<dyn TreasureSource>, sync_interval: Duration) -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            source,
            sync_interval,
            treasures: RwLock::new(Vec::new()),
            location: RwLock::new(None),
            phase: RwLock::new(SyncPhase::Uninitialized),
            shutdown_tx,
        }
    }

    /// Start the sync loop: one refresh immediately, then one per interval,
    /// until `shutdown` fires.
    pub async fn start(self: Arc<Self>) {
        {
            let mut phase = self.phase.write().await;
            if *phase == SyncPhase::Uninitialized {
                *phase = SyncPhase::Loading;
            }
        }

        let mut shutdown_rx = self.shutdown_tx.subscribe();
        tokio::spawn(async move {
            let mut ticker = interval(self.sync_interval);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        self.refresh().await;
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            tracing::debug!("Treasure sync loop stopped");
                            break;
                        }
                    }
                }
            }
        });
    }

    /// Stop the sync loop. Idempotent; in-flight refreshes complete normally.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    /// Pull the full remote set and reconcile it into the local list.
    ///
    /// Never fails observably: transport and parse errors degrade to the same
    /// fallback-or-retain policy as an empty result, and the loading phase
    /// ends after the first completion either way.
    pub async fn refresh(&self) {
        tracing::debug!("Syncing treasures from chain...");

        match self.source.fetch_all_treasures().await {
            Ok(remote) if !remote.is_empty() => {
                // Remote is trusted over stale local state once it returns
                // anything: full replace, not a merge.
                *self.treasures.write().await = remote;
            }
            Ok(_) => {
                self.fall_back_or_retain().await;
            }
            Err(e) => {
                tracing::warn!("Failed to sync treasures: {}", e);
                self.fall_back_or_retain().await;
            }
        }

        self.finish_loading().await;
    }

    // Empty fetches must not flash an empty map while the chain indexer
    // catches up: keep whatever we have, and seed only a truly empty list.
    async fn fall_back_or_retain(&self) {
        let mut treasures = self.treasures.write().await;
        if treasures.is_empty() {
            *treasures = seed_treasures();
        }
    }

    async fn finish_loading(&self) {
        let mut phase = self.phase.write().await;
        if *phase != SyncPhase::Ready {
            *phase = SyncPhase::Ready;
            tracing::debug!("Initial treasure sync complete");
        }
    }

    /// Optimistic insert after a confirmed on-chain create whose indexed form
    /// has not shown up in a refresh yet.
    pub async fn add_local(&self, treasure: Treasure) {
        let mut treasures = self.treasures.write().await;
        if treasures.iter().any(|t| t.id == treasure.id) {
            tracing::warn!("Ignoring duplicate local treasure {}", treasure.id);
            return;
        }
        treasures.push(treasure);
    }

    /// Optimistic removal after a confirmed on-chain delete.
    pub async fn remove_local(&self, id: &str) {
        self.treasures.write().await.retain(|t| t.id != id);
    }

    /// Snapshot of the authoritative list.
    pub async fn treasures(&self) -> Vec<Treasure> {
        self.treasures.read().await.clone()
    }

    pub async fn set_location(&self, location: Location) {
        *self.location.write().await = Some(location);
    }

    pub async fn current_location(&self) -> Option<Location> {
        *self.location.read().await
    }

    pub async fn phase(&self) -> SyncPhase {
        *self.phase.read().await
    }

    /// True until the first refresh completes (success or failure).
    pub async fn is_loading(&self) -> bool {
        *self.phase.read().await != SyncPhase::Ready
    }

    /// First unclaimed treasure strictly inside the claim radius, in list
    /// order; `None` while the player position is unknown.
    ///
    /// List order is the tie-break on purpose: selection is stable across
    /// recomputations rather than distance-minimizing.
    pub async fn nearby_treasure(&self) -> Option<Treasure> {
        let location = (*self.location.read().await)?;
        let treasures = self.treasures.read().await;

        treasures
            .iter()
            .find(|t| {
                !t.is_claimed
                    && geo::distance_meters(location.lat, location.lng, t.lat, t.lng)
                        < CLAIM_RADIUS_METERS
            })
            .cloned()
    }
}
