use super::{object_parser::ObjectParser, sui_client::SuiClient};
use crate::{
    constants::{EVENT_QUERY_PAGE_SIZE, EVENT_TREASURE_CREATED, GAME_MODULE, TREASURE_STRUCT},
    error::Result,
    models::{Treasure, TreasureEvent},
    services::treasure_sync::TreasureSource,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

// Internal helper that extracts the created object id from event payloads.
fn event_treasure_id(parsed: &serde_json::Value) -> Option<String> {
    for key in ["treasure_id", "id", "object_id"] {
        if let Some(id) = parsed.get(key).and_then(|v| v.as_str()) {
            return Some(id.to_string());
        }
    }
    None
}

// Internal helper that parses the fullnode's millisecond timestamp string.
fn parse_timestamp_ms(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let millis: i64 = raw?.parse().ok()?;
    DateTime::<Utc>::from_timestamp_millis(millis)
}

/// Treasure read surface over the fullnode.
///
/// Discovery goes through the package's creation events rather than object
/// ownership: shared treasure objects have no meaningful owner to query by.
pub struct TreasureQueries {
    client: SuiClient,
    parser: ObjectParser,
    package_id: String,
}

impl TreasureQueries {
    pub fn new(client: SuiClient, package_id: String) -> Self {
        Self {
            client,
            parser: ObjectParser::new(),
            package_id,
        }
    }

    fn treasure_event_type(&self) -> String {
        format!(
            "{}::{}::{}",
            self.package_id, GAME_MODULE, EVENT_TREASURE_CREATED
        )
    }

    fn treasure_struct_type(&self) -> String {
        format!("{}::{}::{}", self.package_id, GAME_MODULE, TREASURE_STRUCT)
    }

    /// Fetch the full remote treasure set.
    pub async fn fetch_all_treasures(&self) -> Result<Vec<Treasure>> {
        if self.package_id.trim().is_empty() {
            tracing::warn!("Cannot fetch treasures: package id not configured");
            return Ok(Vec::new());
        }

        let events = self
            .client
            .query_events(&self.treasure_event_type(), EVENT_QUERY_PAGE_SIZE)
            .await?;

        let mut ids: Vec<String> = Vec::new();
        for event in &events {
            let Some(parsed) = event.parsed_json.as_ref() else {
                continue;
            };
            if let Some(id) = event_treasure_id(parsed) {
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
        }

        if ids.is_empty() {
            tracing::debug!("No treasure creation events found");
            return Ok(Vec::new());
        }

        let objects = self.client.multi_get_objects(&ids).await?;
        let treasures: Vec<Treasure> = objects
            .iter()
            .filter_map(|object| self.parser.parse_treasure(object))
            .collect();

        tracing::info!("Fetched {} treasures from chain", treasures.len());
        Ok(treasures)
    }

    /// Fetch a single treasure by object id.
    pub async fn fetch_treasure_by_id(&self, id: &str) -> Result<Option<Treasure>> {
        let object = self.client.get_object(id).await?;
        Ok(self.parser.parse_treasure(&object))
    }

    /// Fetch treasures created by (and still owned by) a specific address.
    pub async fn fetch_user_treasures(&self, address: &str) -> Result<Vec<Treasure>> {
        if self.package_id.trim().is_empty() {
            return Ok(Vec::new());
        }

        let objects = self
            .client
            .get_owned_objects(address, Some(&self.treasure_struct_type()))
            .await?;

        let treasures: Vec<Treasure> = objects
            .iter()
            .filter_map(|object| self.parser.parse_treasure(object))
            .collect();

        tracing::info!(
            "Fetched {} treasures for user {}",
            treasures.len(),
            address
        );
        Ok(treasures)
    }

    /// Recent treasure creation events, newest first.
    pub async fn query_treasure_events(&self, limit: usize) -> Result<Vec<TreasureEvent>> {
        if self.package_id.trim().is_empty() {
            return Ok(Vec::new());
        }

        let events = self
            .client
            .query_events(&self.treasure_event_type(), limit)
            .await?;

        Ok(events
            .into_iter()
            .map(|event| TreasureEvent {
                tx_digest: event.id.tx_digest,
                treasure_id: event.parsed_json.as_ref().and_then(event_treasure_id),
                sender: event.sender,
                timestamp: parse_timestamp_ms(event.timestamp_ms.as_deref()),
            })
            .collect())
    }

    /// Whether a treasure has been claimed; missing objects count as unclaimed.
    pub async fn is_treasure_claimed(&self, id: &str) -> Result<bool> {
        let treasure = self.fetch_treasure_by_id(id).await?;
        Ok(treasure.map(|t| t.is_claimed).unwrap_or(false))
    }
}

#[async_trait]
impl TreasureSource for TreasureQueries {
    async fn fetch_all_treasures(&self) -> Result<Vec<Treasure>> {
        TreasureQueries::fetch_all_treasures(self).await
    }
}
