//! Bodies of outgoing requests.

use serde::{Deserialize, Serialize};

use crate::attachment::Keyboard;
use crate::message::MessageLinkType;
use crate::update::UpdateType;

/// How the platform should interpret markup in `text`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextFormat {
    Markdown,
    Html,
}

/// Reference to a message to reply to or forward.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMessageLink {
    #[serde(rename = "type")]
    pub kind: MessageLinkType,
    pub mid: String,
}

// ─── AttachmentRequest ────────────────────────────────────────────────────────

/// Reference to a previously uploaded file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedInfo {
    pub token: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoRequestPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StickerRequestPayload {
    pub code: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequestPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vcf_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vcf_phone: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareRequestPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// An attachment on an outgoing message, tagged on `type`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AttachmentRequest {
    Image { payload: PhotoRequestPayload },
    Video { payload: UploadedInfo },
    Audio { payload: UploadedInfo },
    File { payload: UploadedInfo },
    Sticker { payload: StickerRequestPayload },
    Contact { payload: ContactRequestPayload },
    InlineKeyboard { payload: Keyboard },
    Location { latitude: f64, longitude: f64 },
    Share { payload: ShareRequestPayload },
}

impl AttachmentRequest {
    pub fn image_url(url: impl Into<String>) -> Self {
        Self::Image { payload: PhotoRequestPayload { url: Some(url.into()), token: None } }
    }

    pub fn keyboard(keyboard: Keyboard) -> Self {
        Self::InlineKeyboard { payload: keyboard }
    }
}

// ─── NewMessageBody ───────────────────────────────────────────────────────────

/// Body of `POST /messages` and `PUT /messages`.
///
/// ```rust
/// use max_types::{NewMessageBody, TextFormat};
///
/// let body = NewMessageBody::text("**hi**").format(TextFormat::Markdown).notify(false);
/// assert_eq!(body.notify, Some(false));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NewMessageBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<AttachmentRequest>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<NewMessageLink>,
    /// `false` to send silently. The platform default is `true`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<TextFormat>,
}

impl NewMessageBody {
    /// Create a message with the given text.
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()), ..Default::default() }
    }

    /// Append an attachment.
    pub fn attach(mut self, attachment: AttachmentRequest) -> Self {
        self.attachments.get_or_insert_with(Vec::new).push(attachment);
        self
    }

    /// Reply to the message with id `mid`.
    pub fn reply_to(mut self, mid: impl Into<String>) -> Self {
        self.link = Some(NewMessageLink { kind: MessageLinkType::Reply, mid: mid.into() });
        self
    }

    /// Forward the message with id `mid`.
    pub fn forward(mut self, mid: impl Into<String>) -> Self {
        self.link = Some(NewMessageLink { kind: MessageLinkType::Forward, mid: mid.into() });
        self
    }

    pub fn notify(mut self, v: bool) -> Self {
        self.notify = Some(v);
        self
    }

    pub fn format(mut self, format: TextFormat) -> Self {
        self.format = Some(format);
        self
    }
}

// ─── Other request bodies ─────────────────────────────────────────────────────

/// Body of `POST /answers`: a new message, a notification, or both.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CallbackAnswer {
    /// Replaces the message carrying the pressed keyboard.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<NewMessageBody>,
    /// One-off toast shown to the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification: Option<String>,
}

impl CallbackAnswer {
    pub fn notification(text: impl Into<String>) -> Self {
        Self { message: None, notification: Some(text.into()) }
    }
}

/// Body of `POST /subscriptions`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionRequestBody {
    /// HTTPS endpoint that will receive updates.
    pub url: String,
    /// Kinds to deliver; all kinds when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_types: Option<Vec<UpdateType>>,
    /// Echoed back in the `X-Max-Bot-Api-Secret` header of every delivery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl SubscriptionRequestBody {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), update_types: None, secret: None, version: None }
    }
}
