//! Shared model record types (no dependencies on HTTP or the filesystem).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::provider::Provider;

/// One entry of a provider's `data` array, exactly as the provider sent it.
pub type RawModel = Map<String, Value>;

/// A free model in the common output shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalizedModel {
    pub provider: Provider,
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub context_length: u64,
    #[serde(default)]
    pub pricing: Map<String, Value>,
    /// Provider-specific fields carried through as-is (only those actually present).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `{"prompt": "0", "completion": "0"}`.
pub fn zero_pricing() -> Map<String, Value> {
    let mut pricing = Map::new();
    pricing.insert("prompt".to_string(), Value::from("0"));
    pricing.insert("completion".to_string(), Value::from("0"));
    pricing
}
