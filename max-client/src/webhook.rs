//! Accepting webhook deliveries.
//!
//! The platform POSTs one JSON [`Update`] per request to the subscribed URL.
//! When the subscription was created with a secret, every delivery carries it
//! in the [`SECRET_HEADER`] header. This module does not run an HTTP server;
//! hand it the header and body from whichever server you use.

use max_types::Update;

use crate::errors::WebhookError;
use crate::serializer::{JsonSerializer, Serializer};

/// Header carrying the subscription secret.
pub const SECRET_HEADER: &str = "X-Max-Bot-Api-Secret";

/// Validates and decodes webhook deliveries.
#[derive(Clone, Debug)]
pub struct WebhookReceiver<S = JsonSerializer> {
    serializer: S,
    secret:     Option<String>,
}

impl WebhookReceiver<JsonSerializer> {
    /// A JSON receiver; `secret` is the value given when subscribing.
    pub fn new(secret: Option<String>) -> Self {
        Self::with_serializer(JsonSerializer::new(), secret)
    }
}

impl<S: Serializer> WebhookReceiver<S> {
    pub fn with_serializer(serializer: S, secret: Option<String>) -> Self {
        Self { serializer, secret }
    }

    /// Check the secret header, then decode the body.
    ///
    /// Without a configured secret the header is ignored.
    pub fn receive(&self, secret_header: Option<&str>, body: &[u8]) -> Result<Update, WebhookError> {
        if let Some(expected) = &self.secret {
            if !secret_matches(expected, secret_header) {
                tracing::warn!("[max] webhook delivery rejected: secret mismatch");
                return Err(WebhookError::SecretMismatch);
            }
        }
        let update = self
            .serializer
            .deserialize_bytes::<Update>(Some(body))?
            .ok_or(WebhookError::Empty)?;
        tracing::debug!("[max] webhook update: {}", update.type_name());
        Ok(update)
    }

    /// [`receive`](Self::receive) taking the header straight from a request.
    pub fn receive_request<B: AsRef<[u8]>>(&self, request: &http::Request<B>) -> Result<Update, WebhookError> {
        let header = request
            .headers()
            .get(SECRET_HEADER)
            .and_then(|v| v.to_str().ok());
        self.receive(header, request.body().as_ref())
    }
}

/// Compare without short-circuiting on the first differing byte.
fn secret_matches(expected: &str, got: Option<&str>) -> bool {
    let Some(got) = got else { return false };
    if expected.len() != got.len() {
        return false;
    }
    expected
        .bytes()
        .zip(got.bytes())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

/// Decode a single update without any secret check.
pub fn parse_update(body: &[u8]) -> Result<Update, WebhookError> {
    WebhookReceiver::new(None).receive(None, body)
}
