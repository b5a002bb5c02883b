use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::PENDING_ID_PREFIX;

// ==================== TREASURE ====================

/// One on-chain treasure as the client tracks it. Identity is `id`; a
/// claimed treasure is inert and never surfaces in proximity checks again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Treasure {
    pub id: String,
    pub creator: String,
    pub name: String,
    pub description: String,
    pub lat: f64,
    pub lng: f64,
    pub is_claimed: bool,
}

impl Treasure {
    /// Local placeholder entries whose on-chain form has not been indexed yet.
    pub fn is_pending(&self) -> bool {
        self.id.starts_with(PENDING_ID_PREFIX)
    }
}

/// Placeholder id for an optimistic insert when the signer response did not
/// carry the created object id.
pub fn pending_treasure_id() -> String {
    let suffix: [u8; 8] = rand::rng().random();
    format!("{}{}", PENDING_ID_PREFIX, hex::encode(suffix))
}

// ==================== LOCATION ====================

/// Ephemeral player position sample in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

// ==================== PROOF ====================

/// Output of the location proof generator (Groth16-shaped placeholder).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofBundle {
    pub proof: Vec<u8>,
    pub public_signals: Vec<String>,
}

// ==================== TRANSACTIONS ====================

/// What the signer reports back after executing a move call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxOutcome {
    pub digest: String,
    pub created_object_id: Option<String>,
}

// ==================== EVENTS ====================

/// A treasure lifecycle event observed on the chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreasureEvent {
    pub tx_digest: String,
    pub treasure_id: Option<String>,
    pub sender: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}
