//! Users and bot profile information.

use serde::{Deserialize, Serialize};

// ─── User ─────────────────────────────────────────────────────────────────────

/// A Max user or bot as it appears in messages and updates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default)]
    pub is_bot: bool,
    /// Last time the user was seen online, in Unix milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_activity_time: Option<i64>,
    /// Display name. Deprecated by the platform in favour of first/last name,
    /// but still sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_avatar_url: Option<String>,
}

impl User {
    /// First and last name joined by a space.
    pub fn full_name(&self) -> String {
        match &self.last_name {
            Some(last) if !last.is_empty() => format!("{} {last}", self.first_name),
            _ => self.first_name.clone(),
        }
    }
}

// ─── BotInfo ──────────────────────────────────────────────────────────────────

/// A command shown in the bot's menu.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotCommand {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The bot's own profile, returned by `GET /me`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BotInfo {
    #[serde(flatten)]
    pub user: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commands: Option<Vec<BotCommand>>,
}
