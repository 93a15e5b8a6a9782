use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Failure of one call to the reporting backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {after_ms} ms")]
    Timeout { after_ms: u32 },

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The request was never sent.
    #[error("Missing required parameter `{0}`")]
    MissingParameter(&'static str),

    /// Parameters could not be put into a query string. Never sent either.
    #[error("Failed to encode request: {0}")]
    Encode(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl ApiError {
    /// Transport failures worth retrying. Backend answers are final.
    pub fn is_transient(&self) -> bool {
        matches!(self, ApiError::Network(_) | ApiError::Timeout { .. })
    }
}

/// FastAPI error body: `{"detail": "..."}`
#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// Turn a finished HTTP exchange into a typed document or an [`ApiError`].
///
/// Status codes are passed through untouched; a non-2xx answer carries the
/// backend's `detail` when it sent one, the status text otherwise.
pub fn interpret_response<T: DeserializeOwned>(
    status: u16,
    status_text: &str,
    body: &str,
) -> Result<T, ApiError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .map(|b| match b.detail {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| status_text.to_string());
        return Err(ApiError::Http { status, message });
    }

    serde_json::from_str(body).map_err(|e| ApiError::Parse(e.to_string()))
}
