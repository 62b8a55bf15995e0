//! One refresh run: poll each provider in order, then merge.

use crate::core::config::Config;
use crate::core::models::{self, NormalizedModel, ProviderOutcome};
use crate::core::provider::Provider;

/// How a single provider fared in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderStatus {
    Fetched,
    Skipped,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderReport {
    pub provider: Provider,
    pub status: ProviderStatus,
    pub count: usize,
    /// Why nothing was fetched; `None` when the catalog was fetched.
    pub reason: Option<String>,
}

/// Result of polling every provider: the sorted aggregate plus a per-provider summary.
#[derive(Debug)]
pub struct RunReport {
    pub models: Vec<NormalizedModel>,
    pub providers: Vec<ProviderReport>,
}

/// Poll the configured providers one after another and aggregate their free models.
/// Provider faults never abort the run; they show up as `Skipped` or `Failed` reports.
pub async fn run(client: &reqwest::Client, config: &Config) -> RunReport {
    let mut batches = Vec::with_capacity(config.providers.len());
    let mut providers = Vec::with_capacity(config.providers.len());

    for provider_config in &config.providers {
        let outcome = models::fetch_free_models(client, provider_config).await;
        let (status, reason) = match &outcome {
            ProviderOutcome::Fetched(_) => (ProviderStatus::Fetched, None),
            ProviderOutcome::Skipped { var } => {
                (ProviderStatus::Skipped, Some(format!("{} not set", var)))
            }
            ProviderOutcome::Failed(e) => (ProviderStatus::Failed, Some(e.to_string())),
        };
        providers.push(ProviderReport {
            provider: provider_config.provider,
            status,
            count: outcome.count(),
            reason,
        });
        batches.push(outcome.into_models());
    }

    RunReport {
        models: models::aggregate(batches),
        providers,
    }
}
