//! Fetch provider model catalogs and keep the free entries.

use std::time::Duration;

use reqwest::header::ACCEPT;
use serde::Deserialize;
use serde_json::Value;

use crate::core::app;
use crate::core::config::ProviderConfig;
use crate::core::provider::Provider;

use super::error::FetchError;
use super::filter;
use super::info::{NormalizedModel, RawModel};
use super::normalize;

/// `{"data": [...]}`; a missing `data` key reads as an empty catalog.
#[derive(Deserialize)]
struct ModelsResponse {
    #[serde(default)]
    data: Vec<Value>,
}

/// What one provider contributed to a run.
#[derive(Debug)]
pub enum ProviderOutcome {
    Fetched(Vec<NormalizedModel>),
    /// No credential configured; nothing was requested.
    Skipped { var: &'static str },
    Failed(FetchError),
}

impl ProviderOutcome {
    /// Number of models contributed (0 unless fetched).
    pub fn count(&self) -> usize {
        match self {
            ProviderOutcome::Fetched(models) => models.len(),
            ProviderOutcome::Skipped { .. } | ProviderOutcome::Failed(_) => 0,
        }
    }

    /// Collapse to the (possibly empty) list of models.
    pub fn into_models(self) -> Vec<NormalizedModel> {
        match self {
            ProviderOutcome::Fetched(models) => models,
            ProviderOutcome::Skipped { .. } | ProviderOutcome::Failed(_) => Vec::new(),
        }
    }
}

/// HTTP client shared by all provider requests of a run.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(app::user_agent())
        .build()
}

/// GET the provider's models endpoint and return the entries of its `data` array.
/// Entries that are not JSON objects are dropped.
pub async fn fetch_raw_models(
    client: &reqwest::Client,
    url: &str,
    token: &str,
) -> Result<Vec<RawModel>, FetchError> {
    let response = client
        .get(url)
        .bearer_auth(token)
        .header(ACCEPT, "application/json")
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(FetchError::status(status, &body));
    }

    let parsed: ModelsResponse = serde_json::from_str(&body)?;
    let total = parsed.data.len();
    let models: Vec<RawModel> = parsed
        .data
        .into_iter()
        .filter_map(|entry| match entry {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .collect();
    if models.len() < total {
        log::debug!("Dropped {} non-object entries from {}", total - models.len(), url);
    }
    Ok(models)
}

/// Keep and normalize the entries that pass `provider`'s free rule.
pub fn select_free(provider: Provider, raw: &[RawModel]) -> Vec<NormalizedModel> {
    raw.iter()
        .filter(|m| filter::is_free(provider, m))
        .map(|m| normalize::normalize(provider, m))
        .collect()
}

/// Fetch one provider's free models.
/// Never fails: every fault is folded into the outcome and logged.
pub async fn fetch_free_models(
    client: &reqwest::Client,
    provider_config: &ProviderConfig,
) -> ProviderOutcome {
    let provider = provider_config.provider;
    let Some(token) = provider_config.token.as_deref() else {
        return ProviderOutcome::Skipped {
            var: provider.credential_var(),
        };
    };

    log::debug!("Requesting {} models from {}", provider, provider_config.url);
    match fetch_raw_models(client, &provider_config.url, token).await {
        Ok(raw) => {
            let free = select_free(provider, &raw);
            log::debug!("{}: {} of {} models are free", provider, free.len(), raw.len());
            log::info!("Found {} free models from {}", free.len(), provider);
            ProviderOutcome::Fetched(free)
        }
        Err(e) => {
            log::error!("Error fetching {} models: {}", provider, e);
            ProviderOutcome::Failed(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_config(
        provider: Provider,
        server: &MockServer,
        token: Option<&str>,
    ) -> ProviderConfig {
        ProviderConfig {
            provider,
            url: format!("{}/v1/models", server.uri()),
            token: token.map(str::to_string),
        }
    }

    fn client() -> reqwest::Client {
        build_client(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn sends_bearer_token_and_keeps_free_models() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/models"))
            .and(header("authorization", "Bearer or-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    {
                        "id": "m1",
                        "name": "Model One",
                        "pricing": {"prompt": "0", "completion": "0"}
                    },
                    {"id": "m2", "name": "Paid", "pricing": {"prompt": "0.1", "completion": "0.2"}}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let cfg = provider_config(Provider::OpenRouter, &server, Some("or-key"));
        let outcome = fetch_free_models(&client(), &cfg).await;
        assert_eq!(outcome.count(), 1);
        let models = outcome.into_models();
        assert_eq!(models[0].id, "m1");
        assert_eq!(models[0].provider, Provider::OpenRouter);
    }

    #[tokio::test]
    async fn missing_token_skips_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(0)
            .mount(&server)
            .await;

        let cfg = provider_config(Provider::Zhipu, &server, None);
        let outcome = fetch_free_models(&client(), &cfg).await;
        match outcome {
            ProviderOutcome::Skipped { var } => assert_eq!(var, "ZHIPU_API_KEY"),
            other => panic!("expected Skipped, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn non_success_status_is_a_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(401).set_body_string(r#"{"error":"invalid key"}"#),
            )
            .mount(&server)
            .await;

        let cfg = provider_config(Provider::SiliconFlow, &server, Some("k"));
        let outcome = fetch_free_models(&client(), &cfg).await;
        match &outcome {
            ProviderOutcome::Failed(FetchError::Status { status, body }) => {
                assert_eq!(status.as_u16(), 401);
                assert!(body.contains("invalid key"));
            }
            other => panic!("expected Status failure, got {:?}", other),
        }
        assert_eq!(outcome.count(), 0);
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let cfg = provider_config(Provider::OpenRouter, &server, Some("k"));
        let outcome = fetch_free_models(&client(), &cfg).await;
        assert!(matches!(outcome, ProviderOutcome::Failed(FetchError::Decode(_))));
    }

    #[tokio::test]
    async fn slow_provider_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"data": []}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let client = build_client(Duration::from_millis(200)).unwrap();
        let cfg = provider_config(Provider::OpenRouter, &server, Some("k"));
        let outcome = fetch_free_models(&client, &cfg).await;
        match outcome {
            ProviderOutcome::Failed(FetchError::Request(e)) => assert!(e.is_timeout()),
            other => panic!("expected timeout, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn missing_data_key_is_an_empty_catalog() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"object": "list"})))
            .mount(&server)
            .await;

        let raw = fetch_raw_models(&client(), &format!("{}/v1/models", server.uri()), "k")
            .await
            .unwrap();
        assert!(raw.is_empty());
    }

    #[tokio::test]
    async fn non_object_entries_are_dropped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": ["glm-4-flash", null, {"id": "glm-4-flash"}]
            })))
            .mount(&server)
            .await;

        let raw = fetch_raw_models(&client(), &format!("{}/v1/models", server.uri()), "k")
            .await
            .unwrap();
        assert_eq!(raw.len(), 1);
        assert_eq!(select_free(Provider::Zhipu, &raw).len(), 1);
    }

    #[test]
    fn select_free_applies_provider_rule() {
        let raw: Vec<RawModel> = [
            json!({"id": "Qwen/Qwen2-7B-free"}),
            json!({"id": "deepseek-ai/DeepSeek-V3"}),
            json!({"id": "internlm/demo-chat"}),
        ]
        .into_iter()
        .filter_map(|v| v.as_object().cloned())
        .collect();
        let ids: Vec<_> = select_free(Provider::SiliconFlow, &raw)
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec!["Qwen/Qwen2-7B-free", "internlm/demo-chat"]);
    }
}
