//! Remote Call Gateway
//!
//! Shared request/response handling for every backend call: one round-trip,
//! no retries, and every failure folded into [`RemoteCallError`].

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum RemoteCallError {
    /// The backend answered with a non-success status.
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid response body: {0}")]
    Decode(String),

    /// Rejected locally before any request was made.
    #[error("{0}")]
    Validation(String),
}

impl RemoteCallError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Network(err) => err.status(),
            _ => None,
        }
    }
}

pub type RemoteResult<T> = Result<T, RemoteCallError>;

/// Where a backend puts the human-readable message in its error bodies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorField {
    /// `{"error": "message"}`
    Flat,
    /// `{"error": {"message": "message"}}`
    Nested,
    /// Error bodies are not inspected.
    Ignored,
}

#[derive(Clone, Copy, Debug)]
pub struct ErrorShape {
    pub field: ErrorField,
    pub fallback: &'static str,
}

impl ErrorShape {
    pub const fn new(field: ErrorField, fallback: &'static str) -> Self {
        Self { field, fallback }
    }

    /// Message extracted from an error body, or the fallback.
    pub fn message_from(&self, body: &str) -> String {
        let extracted = match self.field {
            ErrorField::Ignored => None,
            ErrorField::Flat => serde_json::from_str::<Value>(body)
                .ok()
                .and_then(|value| value.get("error")?.as_str().map(str::to_string)),
            ErrorField::Nested => serde_json::from_str::<Value>(body).ok().and_then(|value| {
                value
                    .get("error")?
                    .get("message")?
                    .as_str()
                    .map(str::to_string)
            }),
        };

        extracted
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| self.fallback.to_string())
    }
}

/// Send `request` and decode a JSON body of type `T`.
pub async fn execute<T: DeserializeOwned>(
    request: RequestBuilder,
    errors: ErrorShape,
) -> RemoteResult<T> {
    let response = request.send().await.map_err(|err| {
        tracing::error!(error = %err, "request failed before a response arrived");
        RemoteCallError::Network(err)
    })?;

    let status = response.status();
    let url = response.url().clone();
    let body = response.text().await?;
    tracing::debug!(%url, %status, bytes = body.len(), "response received");

    if !status.is_success() {
        let message = errors.message_from(&body);
        tracing::error!(%url, %status, %message, "remote call failed");
        return Err(RemoteCallError::Api { status, message });
    }

    serde_json::from_str(&body).map_err(|err| RemoteCallError::Decode(err.to_string()))
}
