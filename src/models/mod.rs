// src/models/mod.rs
pub mod treasure;

// Re-export commonly used types so other modules can use `crate::models::X`
pub use treasure::{
    pending_treasure_id,
    Location,
    ProofBundle,
    Treasure,
    TreasureEvent,
    TxOutcome,
};
