use super::{
    proof::LocationProofGenerator,
    rate_limiter::{RateLimiter, RULE_TREASURE_CLAIM, RULE_TREASURE_CREATE},
    treasure_sync::TreasureSyncEngine,
};
use crate::{
    chain::tx::{self, TransactionSigner},
    error::{AppError, Result},
    models::{pending_treasure_id, Treasure, TxOutcome},
};
use std::sync::Arc;

/// Game Actions - Orchestrates the three on-chain write flows.
///
/// The wallet (signer) and prover are injected; this service only sequences
/// cooldown checks, proof generation, the move call, and the optimistic
/// mutation of the sync engine. Presentation of failures belongs to the
/// caller.
pub struct GameActions {
    engine: Arc<TreasureSyncEngine>,
    signer: Arc<dyn TransactionSigner>,
    prover: Arc<dyn LocationProofGenerator>,
    limiter: RateLimiter,
    package_id: String,
    account: String,
}

impl GameActions {
    pub fn new(
        engine: Arc<TreasureSyncEngine>,
        signer: Arc<dyn TransactionSigner>,
        prover: Arc<dyn LocationProofGenerator>,
        limiter: RateLimiter,
        package_id: String,
        account: String,
    ) -> Self {
        Self {
            engine,
            signer,
            prover,
            limiter,
            package_id,
            account,
        }
    }

    /// Place a new treasure on-chain and insert it optimistically.
    ///
    /// The optimistic entry uses the created object id when the signer
    /// reports one, and a pending placeholder otherwise; either way the next
    /// non-empty refresh supersedes it.
    pub async fn create_treasure(
        &self,
        name: &str,
        description: &str,
        lat: f64,
        lng: f64,
        reward: Option<u64>,
    ) -> Result<Treasure> {
        if !self.limiter.is_allowed(&RULE_TREASURE_CREATE) {
            let remaining_ms = self.limiter.remaining_cooldown_ms(&RULE_TREASURE_CREATE);
            tracing::warn!(
                "Treasure creation rate limited for {} (remaining {}ms)",
                self.account,
                remaining_ms
            );
            return Err(AppError::RateLimitExceeded { remaining_ms });
        }

        let call = tx::create_treasure_call(&self.package_id, name, description, lat, lng, reward);
        let outcome = self.signer.sign_and_execute(call).await?;

        let id = outcome
            .created_object_id
            .clone()
            .unwrap_or_else(pending_treasure_id);

        let treasure = Treasure {
            id,
            creator: self.account.clone(),
            name: name.to_string(),
            description: description.to_string(),
            lat,
            lng,
            is_claimed: false,
        };

        self.engine.add_local(treasure.clone()).await;
        tracing::info!(
            "Treasure {} deployed on-chain (digest {})",
            treasure.id,
            outcome.digest
        );

        Ok(treasure)
    }

    /// Claim a treasure with a freshly generated location proof.
    ///
    /// The local list is deliberately left untouched on success: the claim
    /// flag arrives with the next refresh, the same way every other remote
    /// change does.
    pub async fn claim_treasure(&self, id: &str) -> Result<TxOutcome> {
        let treasure = self.find_treasure(id).await?;
        if treasure.is_pending() {
            return Err(AppError::TreasurePending(id.to_string()));
        }

        let location = self
            .engine
            .current_location()
            .await
            .ok_or(AppError::LocationUnknown)?;

        if !self.limiter.is_allowed(&RULE_TREASURE_CLAIM) {
            let remaining_ms = self.limiter.remaining_cooldown_ms(&RULE_TREASURE_CLAIM);
            return Err(AppError::RateLimitExceeded { remaining_ms });
        }

        let proof = self.prover.generate(location.lat, location.lng, id).await?;

        let call = tx::claim_treasure_call(&self.package_id, id, &proof);
        let outcome = self.signer.sign_and_execute(call).await?;

        tracing::info!("Treasure {} claimed (digest {})", id, outcome.digest);
        Ok(outcome)
    }

    /// Burn a treasure. Pending entries never made it on-chain, so they are
    /// dropped locally without a transaction.
    pub async fn delete_treasure(&self, id: &str) -> Result<()> {
        let treasure = self.find_treasure(id).await?;

        if treasure.is_pending() {
            self.engine.remove_local(id).await;
            tracing::info!("Local-only treasure {} removed", id);
            return Ok(());
        }

        let call = tx::delete_treasure_call(&self.package_id, id);
        let outcome = self.signer.sign_and_execute(call).await?;

        self.engine.remove_local(id).await;
        tracing::info!("Treasure {} burned (digest {})", id, outcome.digest);
        Ok(())
    }

    async fn find_treasure(&self, id: &str) -> Result<Treasure> {
        self.engine
            .treasures()
            .await
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| AppError::TreasureNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::tx::{CallArg, MoveCall};
    use crate::models::{Location, ProofBundle};
    use crate::services::proof::StubProofGenerator;
    use crate::services::treasure_sync::TreasureSource;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tokio::time::Duration;

    struct EmptySource;

    #[async_trait]
    impl TreasureSource for EmptySource {
        async fn fetch_all_treasures(&self) -> Result<Vec<Treasure>> {
            Ok(Vec::new())
        }
    }

    struct RecordingSigner {
        calls: Mutex<Vec<MoveCall>>,
        created_object_id: Option<String>,
        fail: bool,
    }

    impl RecordingSigner {
        fn new(created_object_id: Option<&str>) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                created_object_id: created_object_id.map(str::to_string),
                fail: false,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                created_object_id: None,
                fail: true,
            })
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TransactionSigner for RecordingSigner {
        async fn sign_and_execute(&self, call: MoveCall) -> Result<TxOutcome> {
            self.calls.lock().unwrap().push(call);
            if self.fail {
                return Err(AppError::Transaction("user rejected".to_string()));
            }
            Ok(TxOutcome {
                digest: "9g2AbcDigest".to_string(),
                created_object_id: self.created_object_id.clone(),
            })
        }
    }

    struct InstantProver;

    #[async_trait]
    impl LocationProofGenerator for InstantProver {
        async fn generate(&self, _lat: f64, _lng: f64, treasure_id: &str) -> Result<ProofBundle> {
            Ok(ProofBundle {
                proof: vec![1, 2, 3],
                public_signals: vec![treasure_id.to_string()],
            })
        }
    }

    fn engine() -> Arc<TreasureSyncEngine> {
        Arc::new(TreasureSyncEngine::new(
            Arc::new(EmptySource),
            Duration::from_secs(30),
        ))
    }

    fn actions(
        engine: Arc<TreasureSyncEngine>,
        signer: Arc<RecordingSigner>,
    ) -> GameActions {
        GameActions::new(
            engine,
            signer,
            Arc::new(InstantProver),
            RateLimiter::in_memory(),
            "0xabc".to_string(),
            "0xplayer".to_string(),
        )
    }

    fn remote_treasure(id: &str) -> Treasure {
        Treasure {
            id: id.to_string(),
            creator: "0xplayer".to_string(),
            name: "Stash".to_string(),
            description: String::new(),
            lat: 0.0,
            lng: 0.0,
            is_claimed: false,
        }
    }

    #[tokio::test]
    async fn create_inserts_optimistic_entry_with_created_id() {
        let engine = engine();
        let signer = RecordingSigner::new(Some("0xnew"));
        let actions = actions(engine.clone(), signer.clone());

        let treasure = actions
            .create_treasure("Harbor Stash", "UGC Stash", 40.7128, -74.0060, None)
            .await
            .unwrap();

        assert_eq!(treasure.id, "0xnew");
        assert_eq!(treasure.creator, "0xplayer");
        assert_eq!(engine.treasures().await.len(), 1);
        assert_eq!(signer.call_count(), 1);
    }

    #[tokio::test]
    async fn create_falls_back_to_pending_id() {
        let engine = engine();
        let signer = RecordingSigner::new(None);
        let actions = actions(engine.clone(), signer);

        let treasure = actions
            .create_treasure("Stash", "", 0.0, 0.0, None)
            .await
            .unwrap();

        assert!(treasure.is_pending());
        assert!(engine.treasures().await[0].is_pending());
    }

    #[tokio::test]
    async fn create_is_rate_limited_inside_cooldown() {
        let engine = engine();
        let signer = RecordingSigner::new(Some("0xnew"));
        let actions = actions(engine.clone(), signer.clone());

        actions
            .create_treasure("First", "", 0.0, 0.0, None)
            .await
            .unwrap();
        let err = actions
            .create_treasure("Second", "", 0.0, 0.0, None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::RateLimitExceeded { remaining_ms } if remaining_ms > 0));
        assert_eq!(signer.call_count(), 1);
        assert_eq!(engine.treasures().await.len(), 1);
    }

    #[tokio::test]
    async fn failed_create_does_not_touch_the_list() {
        let engine = engine();
        let actions = GameActions::new(
            engine.clone(),
            RecordingSigner::failing(),
            Arc::new(InstantProver),
            RateLimiter::in_memory(),
            "0xabc".to_string(),
            "0xplayer".to_string(),
        );

        let err = actions
            .create_treasure("Stash", "", 0.0, 0.0, None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Transaction(_)));
        assert!(engine.treasures().await.is_empty());
    }

    #[tokio::test]
    async fn claim_rejects_pending_treasures() {
        let engine = engine();
        engine.add_local(remote_treasure("temp-123")).await;
        engine.set_location(Location { lat: 0.0, lng: 0.0 }).await;
        let signer = RecordingSigner::new(None);
        let actions = actions(engine, signer.clone());

        let err = actions.claim_treasure("temp-123").await.unwrap_err();
        assert!(matches!(err, AppError::TreasurePending(_)));
        assert_eq!(signer.call_count(), 0);
    }

    #[tokio::test]
    async fn claim_requires_a_known_location() {
        let engine = engine();
        engine.add_local(remote_treasure("0x1")).await;
        let signer = RecordingSigner::new(None);
        let actions = actions(engine, signer.clone());

        let err = actions.claim_treasure("0x1").await.unwrap_err();
        assert!(matches!(err, AppError::LocationUnknown));
        assert_eq!(signer.call_count(), 0);
    }

    #[tokio::test]
    async fn claim_signs_proof_carrying_call() {
        let engine = engine();
        engine.add_local(remote_treasure("0x1")).await;
        engine.set_location(Location { lat: 0.0, lng: 0.0 }).await;
        let signer = RecordingSigner::new(None);
        let actions = actions(engine.clone(), signer.clone());

        let outcome = actions.claim_treasure("0x1").await.unwrap();
        assert_eq!(outcome.digest, "9g2AbcDigest");

        // Claim success leaves the list to the next refresh.
        assert_eq!(engine.treasures().await.len(), 1);

        let calls = signer.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].target, "0xabc::game::claim_treasure_with_proof");
        assert_eq!(calls[0].arguments[2], CallArg::PureBytes(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn claim_of_unknown_treasure_fails() {
        let engine = engine();
        engine.set_location(Location { lat: 0.0, lng: 0.0 }).await;
        let actions = actions(engine, RecordingSigner::new(None));

        let err = actions.claim_treasure("0xmissing").await.unwrap_err();
        assert!(matches!(err, AppError::TreasureNotFound(_)));
    }

    #[tokio::test]
    async fn delete_of_pending_treasure_is_local_only() {
        let engine = engine();
        engine.add_local(remote_treasure("temp-123")).await;
        let signer = RecordingSigner::new(None);
        let actions = actions(engine.clone(), signer.clone());

        actions.delete_treasure("temp-123").await.unwrap();

        assert!(engine.treasures().await.is_empty());
        assert_eq!(signer.call_count(), 0);
    }

    #[tokio::test]
    async fn delete_signs_then_removes_locally() {
        let engine = engine();
        engine.add_local(remote_treasure("0x1")).await;
        let signer = RecordingSigner::new(None);
        let actions = actions(engine.clone(), signer.clone());

        actions.delete_treasure("0x1").await.unwrap();

        assert!(engine.treasures().await.is_empty());
        assert_eq!(signer.call_count(), 1);
    }

    #[tokio::test]
    async fn failed_delete_keeps_the_entry() {
        let engine = engine();
        engine.add_local(remote_treasure("0x1")).await;
        let signer = RecordingSigner::failing();
        let actions = GameActions::new(
            engine.clone(),
            signer,
            Arc::new(InstantProver),
            RateLimiter::in_memory(),
            "0xabc".to_string(),
            "0xplayer".to_string(),
        );

        let err = actions.delete_treasure("0x1").await.unwrap_err();
        assert!(matches!(err, AppError::Transaction(_)));
        assert_eq!(engine.treasures().await.len(), 1);
    }

    #[tokio::test]
    async fn stub_prover_is_compatible_with_the_claim_flow() {
        let engine = engine();
        engine.add_local(remote_treasure("0x1")).await;
        engine.set_location(Location { lat: 0.0, lng: 0.0 }).await;
        let signer = RecordingSigner::new(None);
        let actions = GameActions::new(
            engine,
            signer.clone(),
            Arc::new(StubProofGenerator),
            RateLimiter::in_memory(),
            "0xabc".to_string(),
            "0xplayer".to_string(),
        );

        tokio::time::pause();
        actions.claim_treasure("0x1").await.unwrap();

        let calls = signer.calls.lock().unwrap();
        assert_eq!(calls[0].arguments[2], CallArg::PureBytes(vec![1, 2, 3, 4, 5]));
    }
}
