//! Error types for max-client.
//!
//! Every failure of the JSON layer, whatever serde_json reported, surfaces as
//! one [`SerializationError`]. Higher layers wrap it in [`ClientError`] or
//! [`WebhookError`].

use std::io;

use http::StatusCode;
use max_types::ApiError;
use thiserror::Error;

// ─── SerializationError ───────────────────────────────────────────────────────

/// A value could not be converted to or from JSON.
///
/// The underlying library error stays reachable through
/// [`std::error::Error::source`].
#[derive(Debug, Error)]
pub enum SerializationError {
    /// The value cannot be represented as JSON (e.g. a map with non-string keys).
    #[error("serialization failed: {0}")]
    Serialize(#[source] serde_json::Error),
    /// The input is not valid JSON, or does not match the target type.
    #[error("deserialization failed: {0}")]
    Deserialize(#[source] serde_json::Error),
    /// Reading the input stream failed.
    #[error("failed to read input: {0}")]
    Read(#[source] io::Error),
}

impl SerializationError {
    /// `true` if the input was syntactically invalid JSON, as opposed to
    /// valid JSON of the wrong shape.
    pub fn is_syntax(&self) -> bool {
        match self {
            Self::Deserialize(e) => e.is_syntax() || e.is_eof(),
            _                    => false,
        }
    }
}

// ─── WebhookError ─────────────────────────────────────────────────────────────

/// Errors returned while accepting a webhook delivery.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The secret header was missing or did not match the configured secret.
    #[error("webhook secret mismatch")]
    SecretMismatch,
    /// The delivery had no body.
    #[error("empty webhook payload")]
    Empty,
    /// The body was not a valid update.
    #[error("invalid webhook payload: {0}")]
    Payload(#[from] SerializationError),
}

// ─── ClientError ──────────────────────────────────────────────────────────────

/// The error type returned when encoding a call or decoding its response.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The platform rejected the request.
    #[error("API error (HTTP {status}): {error}")]
    Api { status: StatusCode, error: ApiError },
    /// A request body or response body could not be (de)serialized.
    #[error(transparent)]
    Serialization(#[from] SerializationError),
    /// A 2xx response arrived without a body.
    #[error("empty response body (HTTP {0})")]
    EmptyResponse(StatusCode),
    /// The configured base URL cannot carry a path.
    #[error("invalid base URL: {0}")]
    InvalidUrl(String),
    /// A required setting is missing.
    #[error("missing configuration: {0}")]
    Config(&'static str),
    /// The request could not be assembled.
    #[error("failed to build request: {0}")]
    Http(#[from] http::Error),
    #[error(transparent)]
    Webhook(#[from] WebhookError),
}

impl From<url::ParseError> for ClientError {
    fn from(e: url::ParseError) -> Self { Self::InvalidUrl(e.to_string()) }
}

impl ClientError {
    /// Returns `true` if this is the named API error (supports `'*'` wildcards).
    pub fn is(&self, pattern: &str) -> bool {
        match self {
            Self::Api { error, .. } => error.is(pattern),
            _                       => false,
        }
    }

    /// HTTP status of an API error.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } | Self::EmptyResponse(status) => Some(*status),
            _ => None,
        }
    }
}
