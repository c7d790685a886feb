//! Attachments carried by received messages, and inline keyboard buttons.
//!
//! Both hierarchies are tagged on the `type` field. Attachment kinds this
//! crate does not know yet decode as [`Attachment::Unknown`] instead of
//! failing the whole message.

use serde::{Deserialize, Serialize};

use crate::user::User;

// ─── Payloads ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoPayload {
    pub photo_id: i64,
    pub token: String,
    pub url: String,
}

/// Payload shared by video, audio and file attachments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaPayload {
    pub url: String,
    pub token: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StickerPayload {
    pub url: String,
    pub code: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContactPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vcf_info: Option<String>,
    #[serde(default, alias = "tam_info", skip_serializing_if = "Option::is_none")]
    pub max_info: Option<User>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoThumbnail {
    pub url: String,
}

/// Rows of buttons.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyboard {
    pub buttons: Vec<Vec<Button>>,
}

impl Keyboard {
    /// Build a keyboard from rows of buttons.
    pub fn new(rows: impl IntoIterator<Item = Vec<Button>>) -> Self {
        Self { buttons: rows.into_iter().collect() }
    }
}

// ─── Attachment ───────────────────────────────────────────────────────────────

/// An attachment on a received message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Attachment {
    Image {
        payload: PhotoPayload,
    },
    Video {
        payload: MediaPayload,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        thumbnail: Option<VideoThumbnail>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        width: Option<i32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        height: Option<i32>,
        /// Seconds.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration: Option<i32>,
    },
    Audio {
        payload: MediaPayload,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        transcription: Option<String>,
    },
    File {
        payload: MediaPayload,
        filename: String,
        size: i64,
    },
    Sticker {
        payload: StickerPayload,
        width: i32,
        height: i32,
    },
    Contact {
        payload: ContactPayload,
    },
    Share {
        payload: SharePayload,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image_url: Option<String>,
    },
    Location {
        latitude: f64,
        longitude: f64,
    },
    InlineKeyboard {
        payload: Keyboard,
    },
    #[serde(other)]
    Unknown,
}

impl Attachment {
    /// The `type` tag of this attachment.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Image { .. }          => "image",
            Self::Video { .. }          => "video",
            Self::Audio { .. }          => "audio",
            Self::File { .. }           => "file",
            Self::Sticker { .. }        => "sticker",
            Self::Contact { .. }        => "contact",
            Self::Share { .. }          => "share",
            Self::Location { .. }       => "location",
            Self::InlineKeyboard { .. } => "inline_keyboard",
            Self::Unknown               => "unknown",
        }
    }

    /// Download URL for media attachments.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Image { payload }                         => Some(payload.url.as_str()),
            Self::Video { payload, .. }
            | Self::Audio { payload, .. }
            | Self::File { payload, .. }                    => Some(payload.url.as_str()),
            Self::Sticker { payload, .. }                   => Some(payload.url.as_str()),
            Self::Share { payload, .. }                     => payload.url.as_deref(),
            _ => None,
        }
    }
}

// ─── Button ───────────────────────────────────────────────────────────────────

/// Visual hint for callback buttons.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    #[default]
    Default,
    Positive,
    Negative,
    #[serde(other)]
    Unknown,
}

/// An inline keyboard button.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Button {
    /// Sends a `message_callback` update with `payload` when pressed.
    Callback {
        text: String,
        payload: String,
        #[serde(default)]
        intent: Intent,
    },
    Link {
        text: String,
        url: String,
    },
    RequestContact {
        text: String,
    },
    RequestGeoLocation {
        text: String,
        #[serde(default)]
        quick: bool,
    },
    /// Creates a new chat with the bot when pressed.
    Chat {
        text: String,
        chat_title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        chat_description: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start_payload: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        uuid: Option<i32>,
    },
    /// Sends `text` as a message from the user when pressed.
    Message {
        text: String,
    },
    #[serde(other)]
    Unknown,
}

impl Button {
    pub fn callback(text: impl Into<String>, payload: impl Into<String>) -> Self {
        Self::Callback { text: text.into(), payload: payload.into(), intent: Intent::Default }
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Link { text: text.into(), url: url.into() }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Callback { text, .. }
            | Self::Link { text, .. }
            | Self::RequestContact { text }
            | Self::RequestGeoLocation { text, .. }
            | Self::Chat { text, .. }
            | Self::Message { text } => Some(text.as_str()),
            Self::Unknown => None,
        }
    }
}
