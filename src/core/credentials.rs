//! Bearer token lookup for each provider.
//!
//! Tokens come from the process environment (a `.env` file is loaded into it at startup).
//! A missing token is not an error: the provider is skipped for this run.

use crate::core::provider::Provider;

/// Resolve the provider's token through `lookup` (the process environment in production).
/// Returns `None` (and logs a warning) when the variable is unset, empty, or whitespace.
pub fn resolve<F>(provider: Provider, lookup: F) -> Option<String>
where
    F: FnOnce(&str) -> Option<String>,
{
    let var = provider.credential_var();
    let token = lookup(var)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    if token.is_none() {
        log::warn!("{} not found", var);
    }
    token
}
