use crate::{
    constants::{
        ENTRY_CLAIM_TREASURE, ENTRY_CREATE_TREASURE, ENTRY_DELETE_TREASURE, GAME_MODULE,
        RANDOM_OBJECT_ID,
    },
    error::Result,
    models::{ProofBundle, TxOutcome},
};
use async_trait::async_trait;

/// One programmable move call against the game package.
///
/// This core only describes the call; constructing, signing and gas-paying
/// the enclosing transaction is the wallet layer's job.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveCall {
    pub target: String,
    pub arguments: Vec<CallArg>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CallArg {
    /// A pure value, passed as its string rendering.
    Pure(String),
    /// A byte vector argument.
    PureBytes(Vec<u8>),
    /// An owned or shared object reference.
    Object(String),
}

/// Seam to the wallet: signs and executes a single move call.
#[async_trait]
pub trait TransactionSigner: Send + Sync {
    async fn sign_and_execute(&self, call: MoveCall) -> Result<TxOutcome>;
}

fn call_target(package_id: &str, function: &str) -> String {
    format!("{}::{}::{}", package_id, GAME_MODULE, function)
}

/// Move call placing a new treasure at the given coordinates.
///
/// Coordinates travel as decimal strings, matching the contract's field
/// representation.
pub fn create_treasure_call(
    package_id: &str,
    name: &str,
    description: &str,
    lat: f64,
    lng: f64,
    reward: Option<u64>,
) -> MoveCall {
    let mut arguments = vec![
        CallArg::Pure(name.to_string()),
        CallArg::Pure(description.to_string()),
        CallArg::Pure(lat.to_string()),
        CallArg::Pure(lng.to_string()),
    ];
    if let Some(reward) = reward {
        arguments.push(CallArg::Pure(reward.to_string()));
    }

    MoveCall {
        target: call_target(package_id, ENTRY_CREATE_TREASURE),
        arguments,
    }
}

/// Move call claiming a treasure with a location proof.
pub fn claim_treasure_call(package_id: &str, treasure_id: &str, proof: &ProofBundle) -> MoveCall {
    MoveCall {
        target: call_target(package_id, ENTRY_CLAIM_TREASURE),
        arguments: vec![
            CallArg::Object(treasure_id.to_string()),
            CallArg::Object(RANDOM_OBJECT_ID.to_string()),
            CallArg::PureBytes(proof.proof.clone()),
        ],
    }
}

/// Move call burning a treasure.
pub fn delete_treasure_call(package_id: &str, treasure_id: &str) -> MoveCall {
    MoveCall {
        target: call_target(package_id, ENTRY_DELETE_TREASURE),
        arguments: vec![CallArg::Object(treasure_id.to_string())],
    }
}
