use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GatewayError {
    /// The request never produced an HTTP response.
    #[error("Network error: {0}")]
    Transport(String),
    /// The API answered with a non-success status.
    #[error("API error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Api { status: u16, message: Option<String> },
    #[error("Unexpected response: {0}")]
    Decode(String),
}

#[derive(Deserialize)]
struct FailureBody {
    error: Option<String>,
    message: Option<String>,
}

impl GatewayError {
    /// Build an `Api` error from a failed response, keeping the server's
    /// `error` (or `message`) field when the body carries one.
    pub fn from_failure(status: u16, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<FailureBody>(body)
            .ok()
            .and_then(|b| b.error.or(b.message))
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());

        GatewayError::Api { status, message }
    }

    /// Text shown to the operator: the server's own message when it sent one,
    /// `fallback` otherwise.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            GatewayError::Api {
                message: Some(msg), ..
            } => msg.clone(),
            _ => fallback.to_string(),
        }
    }
}
