//! Provider fetch error types.

/// Longest slice of an error response body kept for logs.
const MAX_BODY_PREVIEW: usize = 200;

/// Why a provider contributed no models.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// Build a `Status` error, keeping only the start of the body.
    pub fn status(status: reqwest::StatusCode, body: &str) -> Self {
        let body = body.trim();
        let body = match body.char_indices().nth(MAX_BODY_PREVIEW) {
            Some((idx, _)) => format!("{}…", &body[..idx]),
            None => body.to_string(),
        };
        FetchError::Status { status, body }
    }
}
