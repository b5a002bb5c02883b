use crate::{constants::PROOF_GENERATION_DELAY_MS, error::Result, models::ProofBundle};
use async_trait::async_trait;
use tokio::time::Duration;

/// Seam to the prover: produces a location proof for a claim attempt.
///
/// The engine treats the bundle as opaque bytes; whatever circuit backs the
/// real prover is not this crate's concern.
#[async_trait]
pub trait LocationProofGenerator: Send + Sync {
    async fn generate(&self, lat: f64, lng: f64, treasure_id: &str) -> Result<ProofBundle>;
}

/// Placeholder prover: fixed latency, fixed Groth16-shaped output.
pub struct StubProofGenerator;

#[async_trait]
impl LocationProofGenerator for StubProofGenerator {
    async fn generate(&self, lat: f64, lng: f64, treasure_id: &str) -> Result<ProofBundle> {
        if treasure_id.is_empty() {
            return Err(crate::error::AppError::Proof(
                "treasure id must not be empty".to_string(),
            ));
        }

        tracing::info!(
            "Generating location proof for treasure {} at {:.4}, {:.4}",
            treasure_id,
            lat,
            lng
        );

        // Stand-in for the real prover round-trip.
        tokio::time::sleep(Duration::from_millis(PROOF_GENERATION_DELAY_MS)).await;

        Ok(ProofBundle {
            proof: vec![1, 2, 3, 4, 5],
            public_signals: vec![treasure_id.to_string()],
        })
    }
}
