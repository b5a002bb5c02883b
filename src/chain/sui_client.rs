use crate::error::Result;
use serde::Deserialize;

fn rpc_request(method: &str, params: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "method": method,
        "params": params,
        "id": 1
    })
}

fn object_data_options() -> serde_json::Value {
    serde_json::json!({
        "showContent": true,
        "showOwner": true
    })
}

/// Sui fullnode JSON-RPC client
pub struct SuiClient {
    rpc_url: String,
    client: reqwest::Client,
}

impl SuiClient {
    pub fn new(rpc_url: String) -> Self {
        Self {
            rpc_url,
            client: reqwest::Client::new(),
        }
    }

    /// Get one object with its content
    pub async fn get_object(&self, object_id: &str) -> Result<ObjectResponse> {
        self.call(
            "sui_getObject",
            serde_json::json!([object_id, object_data_options()]),
        )
        .await
    }

    /// Get a batch of objects with their content
    pub async fn multi_get_objects(&self, object_ids: &[String]) -> Result<Vec<ObjectResponse>> {
        if object_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.call(
            "sui_multiGetObjects",
            serde_json::json!([object_ids, object_data_options()]),
        )
        .await
    }

    /// Get objects owned by an address, optionally filtered by struct type
    pub async fn get_owned_objects(
        &self,
        owner: &str,
        struct_type: Option<&str>,
    ) -> Result<Vec<ObjectResponse>> {
        let mut query = serde_json::json!({
            "options": object_data_options()
        });
        if let Some(struct_type) = struct_type {
            query["filter"] = serde_json::json!({ "StructType": struct_type });
        }

        let page: Page<ObjectResponse> = self
            .call(
                "suix_getOwnedObjects",
                serde_json::json!([owner, query]),
            )
            .await?;

        Ok(page.data)
    }

    /// Query move events by event type, newest first
    pub async fn query_events(&self, event_type: &str, limit: usize) -> Result<Vec<RawEvent>> {
        let page: Page<RawEvent> = self
            .call(
                "suix_queryEvents",
                serde_json::json!([
                    { "MoveEventType": event_type },
                    null,
                    limit,
                    true
                ]),
            )
            .await?;

        Ok(page.data)
    }

    async fn call<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T> {
        let request = rpc_request(method, params);

        let response = self
            .client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| crate::error::AppError::BlockchainRpc(e.to_string()))?;

        let envelope: RpcEnvelope<T> = response
            .json()
            .await
            .map_err(|e| crate::error::AppError::ObjectParse(e.to_string()))?;

        if let Some(error) = envelope.error {
            return Err(crate::error::AppError::BlockchainRpc(format!(
                "{} ({})",
                error.message, error.code
            )));
        }

        envelope.result.ok_or_else(|| {
            crate::error::AppError::BlockchainRpc(format!("{} returned no result", method))
        })
    }
}

#[derive(Debug, Deserialize)]
struct RpcEnvelope<T> {
    result: Option<T>,
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub has_next_page: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectResponse {
    pub data: Option<ObjectData>,
    pub error: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectData {
    pub object_id: String,
    pub content: Option<serde_json::Value>,
    pub owner: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    pub id: EventId,
    pub sender: Option<String>,
    pub parsed_json: Option<serde_json::Value>,
    pub timestamp_ms: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventId {
    pub tx_digest: String,
    pub event_seq: Option<String>,
}
