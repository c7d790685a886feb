//! The update hierarchy delivered by webhooks and `GET /updates`.
//!
//! Every update is a JSON object with an `update_type` discriminator that
//! selects one of the [`Update`] variants. Decoding is done by hand rather than
//! with serde's internally-tagged enums so that
//!
//! * a malformed payload of a *known* kind is reported as an error instead of
//!   silently falling through to another variant, and
//! * an *unknown* kind is kept whole in [`Update::Unknown`], so a newer server
//!   never breaks an older client.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::chat::Chat;
use crate::message::Message;
use crate::user::User;

/// Name of the discriminator field.
pub const UPDATE_TYPE_KEY: &str = "update_type";

// ─── Update payloads ──────────────────────────────────────────────────────────

/// A new message was sent to a chat the bot is in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MessageCreatedUpdate {
    pub timestamp: i64,
    pub message: Message,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_locale: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MessageEditedUpdate {
    pub timestamp: i64,
    pub message: Message,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MessageRemovedUpdate {
    pub timestamp: i64,
    pub message_id: String,
    pub chat_id: i64,
    pub user_id: i64,
}

/// A user pressed a callback button.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MessageCallbackUpdate {
    pub timestamp: i64,
    pub callback: crate::result::Callback,
    /// The message carrying the keyboard. Absent if it was deleted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_locale: Option<String>,
}

/// A user pressed "Start" in a dialog with the bot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BotStartedUpdate {
    pub timestamp: i64,
    pub chat_id: i64,
    pub user: User,
    /// Deep-link payload, if the dialog was opened through one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_locale: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BotStoppedUpdate {
    pub timestamp: i64,
    pub chat_id: i64,
    pub user: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_locale: Option<String>,
}

/// The bot was added to or removed from a chat. `user` is who did it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BotMembershipUpdate {
    pub timestamp: i64,
    pub chat_id: i64,
    pub user: User,
    #[serde(default)]
    pub is_channel: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserAddedUpdate {
    pub timestamp: i64,
    pub chat_id: i64,
    pub user: User,
    /// Absent when the user joined by link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inviter_id: Option<i64>,
    #[serde(default)]
    pub is_channel: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserRemovedUpdate {
    pub timestamp: i64,
    pub chat_id: i64,
    pub user: User,
    /// Absent when the user left on their own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_id: Option<i64>,
    #[serde(default)]
    pub is_channel: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatTitleChangedUpdate {
    pub timestamp: i64,
    pub chat_id: i64,
    pub user: User,
    pub title: String,
}

/// A chat was created from a `chat` button.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MessageChatCreatedUpdate {
    pub timestamp: i64,
    pub chat: Chat,
    pub message_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_payload: Option<String>,
}

/// Dialog-level events: cleared, removed, muted, unmuted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DialogUpdate {
    pub timestamp: i64,
    pub chat_id: i64,
    pub user: User,
    /// Unix milliseconds; only sent with `dialog_muted`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muted_until: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_locale: Option<String>,
}

// ─── RawUpdate ────────────────────────────────────────────────────────────────

/// An update whose `update_type` this crate does not know.
///
/// The full JSON object, discriminator included, is retained and written back
/// unchanged on serialization.
#[derive(Clone, Debug, PartialEq)]
pub struct RawUpdate {
    pub fields: Map<String, Value>,
}

impl RawUpdate {
    pub fn type_name(&self) -> &str {
        self.fields.get(UPDATE_TYPE_KEY).and_then(Value::as_str).unwrap_or_default()
    }

    pub fn timestamp(&self) -> Option<i64> {
        self.fields.get("timestamp").and_then(Value::as_i64)
    }
}

// ─── Update / UpdateType ──────────────────────────────────────────────────────

/// Returned by [`UpdateType::from_str`] for an unrecognised discriminator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownUpdateType(pub String);

impl fmt::Display for UnknownUpdateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown update type: {:?}", self.0)
    }
}

impl std::error::Error for UnknownUpdateType {}

/// Declares `UpdateType`, `Update` and the discriminator mapping between them
/// from a single table.
macro_rules! update_kinds {
    ($( $(#[$doc:meta])* $variant:ident($payload:ty) = $tag:literal, )+) => {
        /// The `update_type` discriminator of every known update kind.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum UpdateType {
            $( $(#[$doc])* $variant, )+
        }

        impl UpdateType {
            /// Every known kind, in declaration order.
            pub const ALL: &'static [UpdateType] = &[ $( UpdateType::$variant, )+ ];

            /// The wire name, e.g. `"message_created"`.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( UpdateType::$variant => $tag, )+
                }
            }
        }

        impl FromStr for UpdateType {
            type Err = UnknownUpdateType;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $tag => Ok(UpdateType::$variant), )+
                    other => Err(UnknownUpdateType(other.to_owned())),
                }
            }
        }

        /// An event received from the platform.
        #[non_exhaustive]
        #[derive(Clone, Debug, PartialEq)]
        pub enum Update {
            $( $(#[$doc])* $variant($payload), )+
            /// An update kind not mapped to any of the above variants.
            Unknown(RawUpdate),
        }

        impl Update {
            /// The kind of this update; `None` for [`Update::Unknown`].
            pub fn update_type(&self) -> Option<UpdateType> {
                match self {
                    $( Update::$variant(_) => Some(UpdateType::$variant), )+
                    Update::Unknown(_) => None,
                }
            }

            /// Unix milliseconds at which the event happened.
            pub fn timestamp(&self) -> Option<i64> {
                match self {
                    $( Update::$variant(u) => Some(u.timestamp), )+
                    Update::Unknown(raw) => raw.timestamp(),
                }
            }

            fn from_payload(kind: UpdateType, value: Value) -> serde_json::Result<Self> {
                match kind {
                    $( UpdateType::$variant => serde_json::from_value(value).map(Update::$variant), )+
                }
            }

            fn to_payload(&self) -> serde_json::Result<Value> {
                match self {
                    $( Update::$variant(u) => serde_json::to_value(u), )+
                    Update::Unknown(raw) => Ok(Value::Object(raw.fields.clone())),
                }
            }
        }
    };
}

update_kinds! {
    MessageCreated(MessageCreatedUpdate)         = "message_created",
    MessageEdited(MessageEditedUpdate)           = "message_edited",
    MessageRemoved(MessageRemovedUpdate)         = "message_removed",
    MessageCallback(MessageCallbackUpdate)       = "message_callback",
    BotStarted(BotStartedUpdate)                 = "bot_started",
    BotStopped(BotStoppedUpdate)                 = "bot_stopped",
    BotAdded(BotMembershipUpdate)                = "bot_added",
    BotRemoved(BotMembershipUpdate)              = "bot_removed",
    UserAdded(UserAddedUpdate)                   = "user_added",
    UserRemoved(UserRemovedUpdate)               = "user_removed",
    ChatTitleChanged(ChatTitleChangedUpdate)     = "chat_title_changed",
    MessageChatCreated(MessageChatCreatedUpdate) = "message_chat_created",
    DialogMuted(DialogUpdate)                    = "dialog_muted",
    DialogUnmuted(DialogUpdate)                  = "dialog_unmuted",
    DialogCleared(DialogUpdate)                  = "dialog_cleared",
    DialogRemoved(DialogUpdate)                  = "dialog_removed",
}

impl UpdateType {
    /// Comma-separated wire names, as the `types` query parameter expects.
    pub fn join(types: &[UpdateType]) -> String {
        types.iter().map(|t| t.as_str()).collect::<Vec<_>>().join(",")
    }
}

impl fmt::Display for UpdateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for UpdateType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for UpdateType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(D::Error::custom)
    }
}

impl Update {
    /// The raw discriminator, known or not.
    pub fn type_name(&self) -> &str {
        match self {
            Update::Unknown(raw) => raw.type_name(),
            known => known.update_type().map_or("", UpdateType::as_str),
        }
    }

    /// The chat the update happened in, where the kind carries one.
    pub fn chat_id(&self) -> Option<i64> {
        match self {
            Update::MessageCreated(u) => u.message.chat_id(),
            Update::MessageEdited(u) => u.message.chat_id(),
            Update::MessageRemoved(u) => Some(u.chat_id),
            Update::MessageCallback(u) => u.message.as_ref().and_then(Message::chat_id),
            Update::BotStarted(u) => Some(u.chat_id),
            Update::BotStopped(u) => Some(u.chat_id),
            Update::BotAdded(u) | Update::BotRemoved(u) => Some(u.chat_id),
            Update::UserAdded(u) => Some(u.chat_id),
            Update::UserRemoved(u) => Some(u.chat_id),
            Update::ChatTitleChanged(u) => Some(u.chat_id),
            Update::MessageChatCreated(u) => Some(u.chat.chat_id),
            Update::DialogMuted(u)
            | Update::DialogUnmuted(u)
            | Update::DialogCleared(u)
            | Update::DialogRemoved(u) => Some(u.chat_id),
            Update::Unknown(raw) => raw.fields.get("chat_id").and_then(Value::as_i64),
        }
    }

    /// The message carried by the update, if any.
    pub fn message(&self) -> Option<&Message> {
        match self {
            Update::MessageCreated(u) => Some(&u.message),
            Update::MessageEdited(u) => Some(&u.message),
            Update::MessageCallback(u) => u.message.as_ref(),
            _ => None,
        }
    }

    /// The user's locale (IETF tag such as `"ru"`) where the kind carries one.
    pub fn user_locale(&self) -> Option<&str> {
        match self {
            Update::MessageCreated(u) => u.user_locale.as_deref(),
            Update::MessageCallback(u) => u.user_locale.as_deref(),
            Update::BotStarted(u) => u.user_locale.as_deref(),
            Update::BotStopped(u) => u.user_locale.as_deref(),
            Update::DialogMuted(u)
            | Update::DialogUnmuted(u)
            | Update::DialogCleared(u)
            | Update::DialogRemoved(u) => u.user_locale.as_deref(),
            _ => None,
        }
    }
}

impl Serialize for Update {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut value = self.to_payload().map_err(S::Error::custom)?;
        if let (Some(kind), Value::Object(fields)) = (self.update_type(), &mut value) {
            fields.insert(UPDATE_TYPE_KEY.to_owned(), Value::String(kind.as_str().to_owned()));
        }
        value.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Update {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = Map::<String, Value>::deserialize(deserializer)?;
        let kind = match fields.get(UPDATE_TYPE_KEY) {
            Some(Value::String(name)) => name.parse::<UpdateType>().ok(),
            Some(other) => {
                return Err(D::Error::custom(format_args!(
                    "`{UPDATE_TYPE_KEY}` must be a string, got {other}"
                )));
            }
            None => return Err(D::Error::missing_field(UPDATE_TYPE_KEY)),
        };

        match kind {
            Some(kind) => Update::from_payload(kind, Value::Object(fields))
                .map_err(|e| D::Error::custom(format_args!("invalid `{}` update: {e}", kind))),
            None => Ok(Update::Unknown(RawUpdate { fields })),
        }
    }
}

// ─── UpdateList ───────────────────────────────────────────────────────────────

/// A batch returned by `GET /updates`.
///
/// `marker` is the position to pass back on the next poll; it is absent when
/// the batch is empty and no position change happened.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateList {
    pub updates: Vec<Update>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<i64>,
}

impl UpdateList {
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.updates.len()
    }
}

impl IntoIterator for UpdateList {
    type Item = Update;
    type IntoIter = std::vec::IntoIter<Update>;

    fn into_iter(self) -> Self::IntoIter {
        self.updates.into_iter()
    }
}
