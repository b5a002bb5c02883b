use super::treasure_sync::TreasureSyncEngine;
use crate::{error::Result, models::Location};
use futures_util::{Stream, StreamExt};
use std::sync::Arc;

/// Location Tracker - Feeds position samples into the sync engine.
///
/// Any platform adapter (browser geolocation bridge, GPS daemon, replay
/// file) can be plugged in as a stream of samples. Each `Ok` unconditionally
/// overwrites the current position; errors keep the last known value so the
/// proximity answer degrades instead of disappearing.
pub struct LocationTracker {
    engine: Arc<TreasureSyncEngine>,
}

impl LocationTracker {
    pub fn new(engine: Arc<TreasureSyncEngine>) -> Self {
        Self { engine }
    }

    /// Consume the stream until it ends.
    pub async fn run<S>(&self, stream: S)
    where
        S: Stream<Item = Result<Location>> + Send,
    {
        futures_util::pin_mut!(stream);

        while let Some(sample) = stream.next().await {
            match sample {
                Ok(location) => {
                    self.engine.set_location(location).await;
                }
                Err(e) => {
                    tracing::warn!("Location source error: {}", e);
                }
            }
        }

        tracing::debug!("Location stream ended");
    }

    /// Spawn the subscription in the background.
    pub fn start<S>(self: Arc<Self>, stream: S)
    where
        S: Stream<Item = Result<Location>> + Send + 'static,
    {
        tokio::spawn(async move {
            self.run(stream).await;
        });
    }
}
