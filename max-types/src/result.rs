//! Response envelopes returned by the API endpoints.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::message::Message;
use crate::user::User;

// ─── ApiError ─────────────────────────────────────────────────────────────────

/// Error body returned by the platform with a non-2xx status.
///
/// # Example
/// `{"code":"chat.not.found","message":"Chat 42 not found"}`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Machine-readable error code, e.g. `"attachment.not.ready"`.
    pub code: String,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Match on the error code, with optional wildcard prefix/suffix `'*'`.
    ///
    /// - `err.is("chat.not.found")` exact match
    /// - `err.is("attachment.*")` starts-with match
    /// - `err.is("*.not.found")` ends-with match
    pub fn is(&self, pattern: &str) -> bool {
        if let Some(prefix) = pattern.strip_suffix('*') {
            self.code.starts_with(prefix)
        } else if let Some(suffix) = pattern.strip_prefix('*') {
            self.code.ends_with(suffix)
        } else {
            self.code == pattern
        }
    }
}

// ─── Results ──────────────────────────────────────────────────────────────────

/// Generic acknowledgement: `{"success":true}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleQueryResult {
    pub success: bool,
    /// Explanation when `success` is `false`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SendMessageResult {
    pub message: Message,
}

/// A button press, delivered inside `message_callback` updates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Callback {
    pub timestamp: i64,
    /// Pass to `POST /answers` to answer this press.
    pub callback_id: String,
    /// The pressed button's payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    pub user: User,
}

/// An active webhook subscription.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub url: String,
    /// Unix milliseconds when the subscription was created.
    pub time: i64,
    /// Raw names, so kinds unknown to this crate are still listed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_types: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetSubscriptionsResult {
    pub subscriptions: Vec<Subscription>,
}
