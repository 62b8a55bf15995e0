use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::credentials;
use crate::core::provider::Provider;

/// Output file used when neither `--output` nor `FREE_MODELS_OUTPUT` is set.
pub const DEFAULT_OUTPUT_PATH: &str = "data/free_models.json";

/// Per-request timeout used when `--timeout` is not given.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const OUTPUT_VAR: &str = "FREE_MODELS_OUTPUT";

#[derive(Debug, Clone)]
pub struct Config {
    pub output_path: PathBuf,
    pub timeout: Duration,
    /// One entry per provider, in polling order.
    pub providers: Vec<ProviderConfig>,
}

/// Endpoint and resolved credential for one provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub provider: Provider,
    pub url: String,
    pub token: Option<String>,
}

/// Values given on the command line; they win over the environment.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub output: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("timeout must be at least 1 second")]
    InvalidTimeout,
    #[error("output path is empty")]
    EmptyOutputPath,
    #[error("{var} is not a valid URL: {value}")]
    InvalidUrl { var: &'static str, value: String },
}

/// Load configuration from the environment and CLI overrides.
pub fn load(overrides: &Overrides) -> Result<Config, ConfigError> {
    load_with(overrides, |var| env::var(var).ok())
}

/// Output file only, without resolving provider credentials.
pub fn output_path(overrides: &Overrides) -> Result<PathBuf, ConfigError> {
    output_path_with(overrides, |var| env::var(var).ok())
}

fn output_path_with<F>(overrides: &Overrides, lookup: F) -> Result<PathBuf, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let path = overrides
        .output
        .clone()
        .or_else(|| lookup(OUTPUT_VAR).filter(|s| !s.trim().is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH));
    if path.as_os_str().is_empty() {
        return Err(ConfigError::EmptyOutputPath);
    }
    Ok(path)
}

/// Load configuration reading variables through `lookup`.
pub fn load_with<F>(overrides: &Overrides, lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let output_path = output_path_with(overrides, &lookup)?;

    let timeout_secs = overrides.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
    if timeout_secs == 0 {
        return Err(ConfigError::InvalidTimeout);
    }

    let mut providers = Vec::with_capacity(Provider::ALL.len());
    for provider in Provider::ALL {
        let url = match lookup(provider.base_url_var()).filter(|s| !s.trim().is_empty()) {
            Some(url) => {
                let url = url.trim().to_string();
                if reqwest::Url::parse(&url).is_err() {
                    return Err(ConfigError::InvalidUrl {
                        var: provider.base_url_var(),
                        value: url,
                    });
                }
                url
            }
            None => provider.default_url().to_string(),
        };
        let token = credentials::resolve(provider, |var| lookup(var));
        providers.push(ProviderConfig {
            provider,
            url,
            token,
        });
    }

    Ok(Config {
        output_path,
        timeout: Duration::from_secs(timeout_secs),
        providers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_without_environment() {
        let config = load_with(&Overrides::default(), |_| None).unwrap();
        assert_eq!(config.output_path, PathBuf::from(DEFAULT_OUTPUT_PATH));
        assert_eq!(config.timeout, Duration::from_secs(30));
        let providers: Vec<_> = config.providers.iter().map(|p| p.provider).collect();
        assert_eq!(providers, Provider::ALL.to_vec());
        assert!(config.providers.iter().all(|p| p.token.is_none()));
        assert_eq!(config.providers[0].url, "https://openrouter.ai/api/v1/models");
    }

    #[test]
    fn environment_supplies_tokens_urls_and_output() {
        let env = env_of(&[
            ("OPENROUTER_API_KEY", "or-key"),
            ("ZHIPU_API_KEY", "zp-key"),
            ("SILICONFLOW_BASE_URL", "http://127.0.0.1:9000/v1/models"),
            ("FREE_MODELS_OUTPUT", "out/models.json"),
        ]);
        let config = load_with(&Overrides::default(), |k| env.get(k).cloned()).unwrap();
        assert_eq!(config.output_path, PathBuf::from("out/models.json"));
        assert_eq!(config.providers[0].token.as_deref(), Some("or-key"));
        assert_eq!(config.providers[1].token, None);
        assert_eq!(config.providers[1].url, "http://127.0.0.1:9000/v1/models");
        assert_eq!(config.providers[2].token.as_deref(), Some("zp-key"));
    }

    #[test]
    fn cli_overrides_win_over_environment() {
        let env = env_of(&[("FREE_MODELS_OUTPUT", "from-env.json")]);
        let overrides = Overrides {
            output: Some(PathBuf::from("from-cli.json")),
            timeout_secs: Some(5),
        };
        let config = load_with(&overrides, |k| env.get(k).cloned()).unwrap();
        assert_eq!(config.output_path, PathBuf::from("from-cli.json"));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let overrides = Overrides {
            timeout_secs: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            load_with(&overrides, |_| None),
            Err(ConfigError::InvalidTimeout)
        ));
    }

    #[test]
    fn empty_output_override_is_rejected() {
        let overrides = Overrides {
            output: Some(PathBuf::new()),
            ..Default::default()
        };
        assert!(matches!(
            load_with(&overrides, |_| None),
            Err(ConfigError::EmptyOutputPath)
        ));
    }

    #[test]
    fn malformed_base_url_is_rejected() {
        let env = env_of(&[("ZHIPU_BASE_URL", "not a url")]);
        let err = load_with(&Overrides::default(), |k| env.get(k).cloned()).unwrap_err();
        assert!(err.to_string().contains("ZHIPU_BASE_URL"));
    }
}
