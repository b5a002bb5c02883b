use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Blockchain RPC error: {0}")]
    BlockchainRpc(String),

    #[error("Object parse error: {0}")]
    ObjectParse(String),

    #[error("Rate limit exceeded; retry in {remaining_ms}ms")]
    RateLimitExceeded { remaining_ms: i64 },

    #[error("Treasure {0} is still syncing with the chain")]
    TreasurePending(String),

    #[error("Treasure not found: {0}")]
    TreasureNotFound(String),

    #[error("Player location unknown")]
    LocationUnknown,

    #[error("Proof generation failed: {0}")]
    Proof(String),

    #[error("Transaction failed: {0}")]
    Transaction(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
