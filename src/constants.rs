/// Application constants

// Game package layout (module and entry points of the treasure contract)
pub const GAME_MODULE: &str = "game";
pub const ENTRY_CREATE_TREASURE: &str = "create_treasure";
pub const ENTRY_CLAIM_TREASURE: &str = "claim_treasure_with_proof";
pub const ENTRY_DELETE_TREASURE: &str = "delete_treasure";
pub const EVENT_TREASURE_CREATED: &str = "TreasureCreated";
pub const TREASURE_STRUCT: &str = "Treasure";

// Shared on-chain objects
pub const RANDOM_OBJECT_ID: &str = "0x8";

// Fullnode endpoints
pub const FULLNODE_TESTNET: &str = "https://fullnode.testnet.sui.io:443";
pub const FULLNODE_MAINNET: &str = "https://fullnode.mainnet.sui.io:443";
pub const FULLNODE_DEVNET: &str = "https://fullnode.devnet.sui.io:443";

// Geofence configuration
pub const CLAIM_RADIUS_METERS: f64 = 50.0;
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

// Optimistic entries not yet observed on-chain carry this id prefix
pub const PENDING_ID_PREFIX: &str = "temp-";

// Action cooldowns
pub const COOLDOWN_TREASURE_CREATE_MS: i64 = 30_000;
pub const COOLDOWN_TREASURE_CLAIM_MS: i64 = 5_000;

// Proof stub latency (placeholder for the real prover round-trip)
pub const PROOF_GENERATION_DELAY_MS: u64 = 1_500;

// Background service intervals
pub const TREASURE_SYNC_INTERVAL_SECS: u64 = 30;
pub const STATUS_REPORT_INTERVAL_SECS: u64 = 15;

// Query paging
pub const EVENT_QUERY_PAGE_SIZE: usize = 50;
