use super::sui_client::ObjectResponse;
use crate::models::Treasure;
use serde_json::Value;

/// Object Parser - Maps raw fullnode object JSON into treasure entities
pub struct ObjectParser;

impl ObjectParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse one object response into a treasure.
    ///
    /// Returns `None` for deleted objects, non-move objects, and content
    /// shapes this client does not understand; missing fields degrade to the
    /// wire defaults rather than dropping the entity.
    pub fn parse_treasure(&self, object: &ObjectResponse) -> Option<Treasure> {
        let data = object.data.as_ref()?;
        let content = data.content.as_ref()?;

        if content.get("dataType").and_then(|v| v.as_str()) != Some("moveObject") {
            return None;
        }
        let fields = content.get("fields")?;

        Some(Treasure {
            id: data.object_id.clone(),
            creator: string_field(fields, "creator").unwrap_or_else(|| "0x0".to_string()),
            name: string_field(fields, "name").unwrap_or_else(|| "Unknown".to_string()),
            description: string_field(fields, "description").unwrap_or_default(),
            lat: coordinate_field(fields, "lat"),
            lng: coordinate_field(fields, "lng"),
            is_claimed: fields
                .get("is_opened")
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
        })
    }
}

impl Default for ObjectParser {
    fn default() -> Self {
        Self::new()
    }
}

fn string_field(fields: &Value, name: &str) -> Option<String> {
    fields
        .get(name)
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .filter(|v| !v.is_empty())
}

// Coordinates are stored on-chain as decimal strings; tolerate raw numbers
// from older package versions.
fn coordinate_field(fields: &Value, name: &str) -> f64 {
    match fields.get(name) {
        Some(Value::String(raw)) => raw.parse().unwrap_or(0.0),
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        _ => 0.0,
    }
}
