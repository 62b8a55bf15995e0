//! The closed set of catalog providers and their fixed endpoints.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A provider whose model catalog is scanned for free models.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    #[serde(rename = "OpenRouter")]
    OpenRouter,
    #[serde(rename = "SiliconFlow")]
    SiliconFlow,
    #[serde(rename = "Zhipu AI")]
    Zhipu,
}

impl Provider {
    /// Polling order. Providers are always queried in this order.
    pub const ALL: [Provider; 3] = [Provider::OpenRouter, Provider::SiliconFlow, Provider::Zhipu];

    /// Display name, also the serialized form in the output file.
    pub fn name(self) -> &'static str {
        match self {
            Provider::OpenRouter => "OpenRouter",
            Provider::SiliconFlow => "SiliconFlow",
            Provider::Zhipu => "Zhipu AI",
        }
    }

    /// Environment variable holding the bearer token.
    pub fn credential_var(self) -> &'static str {
        match self {
            Provider::OpenRouter => "OPENROUTER_API_KEY",
            Provider::SiliconFlow => "SILICONFLOW_API_KEY",
            Provider::Zhipu => "ZHIPU_API_KEY",
        }
    }

    /// Environment variable that overrides the models endpoint.
    pub fn base_url_var(self) -> &'static str {
        match self {
            Provider::OpenRouter => "OPENROUTER_BASE_URL",
            Provider::SiliconFlow => "SILICONFLOW_BASE_URL",
            Provider::Zhipu => "ZHIPU_BASE_URL",
        }
    }

    /// Models endpoint used when no override is set.
    pub fn default_url(self) -> &'static str {
        match self {
            Provider::OpenRouter => "https://openrouter.ai/api/v1/models",
            Provider::SiliconFlow => "https://api.siliconflow.cn/v1/models",
            Provider::Zhipu => "https://open.bigmodel.cn/api/paas/v4/models",
        }
    }

    /// Short lowercase alias accepted on the command line.
    pub fn alias(self) -> &'static str {
        match self {
            Provider::OpenRouter => "openrouter",
            Provider::SiliconFlow => "siliconflow",
            Provider::Zhipu => "zhipu",
        }
    }

    /// Look up a provider by display name or alias, ignoring case.
    pub fn from_name(name: &str) -> Option<Provider> {
        let name = name.trim();
        Provider::ALL.into_iter().find(|p| {
            p.name().eq_ignore_ascii_case(name) || p.alias().eq_ignore_ascii_case(name)
        })
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
