//! Chat metadata and message recipients.

use serde::{Deserialize, Serialize};

use crate::message::Message;
use crate::user::User;

/// Kind of conversation a message belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatType {
    /// One-to-one conversation between the bot and a user.
    Dialog,
    /// Group chat.
    Chat,
    Channel,
    #[serde(other)]
    Unknown,
}

/// Membership state of the bot in a chat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatStatus {
    Active,
    Removed,
    Left,
    Closed,
    Suspended,
    #[serde(other)]
    Unknown,
}

/// Where a message was sent: a dialog with `user_id`, or a chat with `chat_id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<i64>,
    pub chat_type: ChatType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

/// Chat icon.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
}

// ─── Chat ─────────────────────────────────────────────────────────────────────

/// Chat metadata returned by `GET /chats` and `GET /chats/{chatId}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    pub chat_id: i64,
    #[serde(rename = "type")]
    pub kind: ChatType,
    pub status: ChatStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Image>,
    /// Unix milliseconds of the last event in the chat.
    pub last_event_time: i64,
    pub participants_count: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<i64>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The other party, for dialogs only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialog_with_user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned_message: Option<Box<Message>>,
}

impl Chat {
    /// `true` if this chat is a one-to-one dialog.
    pub fn is_dialog(&self) -> bool {
        self.kind == ChatType::Dialog
    }
}

/// One page of chats. Pass `marker` back to fetch the next page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatList {
    pub chats: Vec<Chat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<i64>,
}
