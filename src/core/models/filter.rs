//! Per-provider "is this model free?" predicates.
//!
//! All predicates are pure and total: absent or oddly typed fields fall back to defaults.

use serde_json::Value;

use super::info::RawModel;
use crate::core::provider::Provider;

/// Id substrings that mark a SiliconFlow model as free.
const SILICONFLOW_FREE_MARKERS: [&str; 3] = ["free", "guest", "demo"];

/// The one Zhipu AI model family known to be free.
const ZHIPU_FREE_FAMILY: &str = "glm-4-flash";

/// Whether `model` is free under `provider`'s rule.
pub fn is_free(provider: Provider, model: &RawModel) -> bool {
    match provider {
        Provider::OpenRouter => openrouter_is_free(model),
        Provider::SiliconFlow => {
            let id = lowercase_id(model);
            SILICONFLOW_FREE_MARKERS.iter().any(|m| id.contains(m))
        }
        Provider::Zhipu => lowercase_id(model).contains(ZHIPU_FREE_FAMILY),
    }
}

/// Both `pricing.prompt` and `pricing.completion` must be the string `"0"`.
/// A missing key, or a missing/non-object `pricing`, reads as `"0"`.
fn openrouter_is_free(model: &RawModel) -> bool {
    let pricing = model.get("pricing").and_then(Value::as_object);
    let is_zero = |key: &str| match pricing.and_then(|p| p.get(key)) {
        None => true,
        Some(v) => v.as_str() == Some("0"),
    };
    is_zero("prompt") && is_zero("completion")
}

fn lowercase_id(model: &RawModel) -> String {
    model
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_lowercase()
}
