//! Projection of raw provider records into [`NormalizedModel`].

use serde_json::{Map, Value};

use super::info::{NormalizedModel, RawModel, zero_pricing};
use crate::core::provider::Provider;

/// Map a raw record that passed the provider's filter into the common shape.
/// Best effort: absent fields get defaults, never an error.
pub fn normalize(provider: Provider, model: &RawModel) -> NormalizedModel {
    let id = string_field(model, "id").unwrap_or_default();
    match provider {
        Provider::OpenRouter => {
            let name = string_field(model, "name")
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| id.clone());
            let mut pricing = model
                .get("pricing")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default();
            for key in ["prompt", "completion"] {
                pricing.entry(key).or_insert_with(|| Value::from("0"));
            }
            NormalizedModel {
                provider,
                name,
                description: string_field(model, "description").unwrap_or_default(),
                context_length: length_field(model, "context_length"),
                pricing,
                extra: passthrough(model, &["top_provider", "created", "created_at"]),
                id,
            }
        }
        Provider::SiliconFlow => NormalizedModel {
            provider,
            name: id.clone(),
            description: "Free model from SiliconFlow".to_string(),
            context_length: length_field(model, "max_context_length"),
            pricing: zero_pricing(),
            extra: passthrough(model, &["object", "created"]),
            id,
        },
        Provider::Zhipu => NormalizedModel {
            provider,
            name: id.clone(),
            description: "Free model from Zhipu AI".to_string(),
            context_length: length_field(model, "max_tokens"),
            pricing: zero_pricing(),
            extra: passthrough(model, &["object", "created", "owned_by"]),
            id,
        },
    }
}

fn string_field(model: &RawModel, key: &str) -> Option<String> {
    model.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Non-negative integer field; floats are truncated, anything else is 0.
fn length_field(model: &RawModel, key: &str) -> u64 {
    match model.get(key) {
        Some(v) => v
            .as_u64()
            .or_else(|| v.as_f64().filter(|f| *f > 0.0).map(|f| f as u64))
            .unwrap_or(0),
        None => 0,
    }
}

fn passthrough(model: &RawModel, keys: &[&str]) -> Map<String, Value> {
    keys.iter()
        .filter_map(|k| {
            model
                .get(*k)
                .filter(|v| !v.is_null())
                .map(|v| (k.to_string(), v.clone()))
        })
        .collect()
}
