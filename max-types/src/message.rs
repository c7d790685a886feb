//! Messages and message bodies.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::attachment::Attachment;
use crate::chat::Recipient;
use crate::markup::MarkupElement;
use crate::user::User;

// ─── MessageBody ──────────────────────────────────────────────────────────────

/// The content of a message: id, text and attachments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MessageBody {
    /// Unique message id, e.g. `mid.00000000007c71e9019a989a84dd5e09`.
    pub mid: String,
    /// Sequence number of the message within its chat.
    pub seq: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markup: Option<Vec<MarkupElement>>,
}

impl MessageBody {
    pub fn new(
        mid: impl Into<String>,
        seq: i64,
        text: impl Into<String>,
        attachments: Vec<Attachment>,
    ) -> Self {
        Self {
            mid: mid.into(),
            seq,
            text: Some(text.into()),
            attachments: Some(attachments),
            markup: None,
        }
    }

    /// The text, if present and non-empty.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }

    /// Attachments as a slice; empty when none were sent.
    pub fn attachments(&self) -> &[Attachment] {
        self.attachments.as_deref().unwrap_or_default()
    }
}

// ─── LinkedMessage ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageLinkType {
    Forward,
    Reply,
    #[serde(other)]
    Unknown,
}

/// A forwarded or replied-to message embedded in another message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinkedMessage {
    #[serde(rename = "type")]
    pub kind: MessageLinkType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<i64>,
    pub message: MessageBody,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageStat {
    pub views: i32,
}

// ─── Message ──────────────────────────────────────────────────────────────────

/// A message as delivered in updates and returned by the messages endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Absent for channel posts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<User>,
    pub recipient: Recipient,
    /// Unix milliseconds.
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<LinkedMessage>,
    /// Webhook payloads carry the body under `body`, long-polling
    /// payloads under `message`.
    #[serde(alias = "message")]
    pub body: MessageBody,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stat: Option<MessageStat>,
    /// Public link, for channel posts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Message {
    pub fn text(&self) -> Option<&str> {
        self.body.text()
    }

    pub fn mid(&self) -> &str {
        &self.body.mid
    }

    pub fn sender_id(&self) -> Option<i64> {
        self.sender.as_ref().map(|u| u.user_id)
    }

    pub fn chat_id(&self) -> Option<i64> {
        self.recipient.chat_id
    }

    /// `timestamp` as a UTC date-time; `None` if out of range.
    pub fn sent_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.timestamp).single()
    }
}

/// Response of `GET /messages`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MessageList {
    pub messages: Vec<Message>,
}
