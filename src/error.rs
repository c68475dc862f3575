//! Error taxonomy for the inventory API client.
//!
//! No variant here triggers an automatic retry. Recovery is always
//! user-initiated: re-authenticate, re-submit, or re-apply filters.

use reqwest::StatusCode;
use serde_json::Value;

/// Errors surfaced by API calls and the push channel.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bad credentials or an invalid/expired token. The client never
    /// refreshes or retries; the caller must re-authenticate.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// The server rejected submitted field data.
    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    #[error("not found: {0}")]
    NotFound(String),

    /// Any other non-success status.
    #[error("server error ({status}): {body}")]
    Server { status: u16, body: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected response shape: {0}")]
    Decode(String),

    #[error("push channel error: {0}")]
    Push(String),

    /// Local token persistence failed.
    #[error("token storage: {0}")]
    Storage(#[from] std::io::Error),
}

impl ApiError {
    /// Map a non-success HTTP response to an error variant.
    pub(crate) fn from_response(status: StatusCode, path: &str, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                let detail = detail_message(&body)
                    .unwrap_or_else(|| "invalid or expired credentials".to_string());
                ApiError::Authentication(detail)
            }
            StatusCode::BAD_REQUEST => match first_field_error(&body) {
                Some((field, message)) => ApiError::Validation { field, message },
                // Unrecognized error shape, fall back to a generic message.
                None => ApiError::Validation {
                    field: "request".to_string(),
                    message: "Please check your input.".to_string(),
                },
            },
            StatusCode::NOT_FOUND => ApiError::NotFound(path.to_string()),
            _ => ApiError::Server {
                status: status.as_u16(),
                body,
            },
        }
    }
}

/// Pull the first field-level error out of a DRF-style error body.
///
/// The server reports validation failures as `{"field": ["message", ...]}`,
/// with `{"error": "..."}` used by the ad-hoc actions such as adjust_stock.
pub(crate) fn first_field_error(body: &str) -> Option<(String, String)> {
    let value: Value = serde_json::from_str(body).ok()?;
    let map = value.as_object()?;

    if let Some(message) = map.get("error").and_then(Value::as_str) {
        return Some(("error".to_string(), message.to_string()));
    }

    for (field, messages) in map {
        if let Some(first) = messages.as_array().and_then(|a| a.first()) {
            if let Some(text) = first.as_str() {
                return Some((field.clone(), text.to_string()));
            }
        }
    }
    None
}

fn detail_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")
        .and_then(Value::as_str)
        .map(str::to_string)
}
