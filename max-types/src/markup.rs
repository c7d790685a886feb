//! Text formatting ranges attached to a message body.
//!
//! Offsets and lengths count UTF-16 code units, like the platform does.

use serde::{Deserialize, Serialize};

/// One formatted range of a message text, tagged on `type`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MarkupElement {
    Strong { from: i32, length: i32 },
    Emphasized { from: i32, length: i32 },
    Monospaced { from: i32, length: i32 },
    Link { from: i32, length: i32, url: String },
    Strikethrough { from: i32, length: i32 },
    Underline { from: i32, length: i32 },
    UserMention {
        from: i32,
        length: i32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        user_link: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        user_id: Option<i64>,
    },
    Heading { from: i32, length: i32 },
    Highlighted { from: i32, length: i32 },
    /// A kind this crate does not know; the range is still usable.
    #[serde(untagged)]
    Unknown(UnknownMarkup),
}

/// Range of a markup kind without a dedicated variant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnknownMarkup {
    #[serde(rename = "type")]
    pub kind: String,
    pub from: i32,
    pub length: i32,
}

impl MarkupElement {
    /// `(from, length)` of the range.
    pub fn range(&self) -> (i32, i32) {
        match *self {
            Self::Strong { from, length }
            | Self::Emphasized { from, length }
            | Self::Monospaced { from, length }
            | Self::Link { from, length, .. }
            | Self::Strikethrough { from, length }
            | Self::Underline { from, length }
            | Self::UserMention { from, length, .. }
            | Self::Heading { from, length }
            | Self::Highlighted { from, length } => (from, length),
            Self::Unknown(ref u) => (u.from, u.length),
        }
    }

    /// The slice of `text` this element covers, or `None` when the range
    /// falls outside it.
    pub fn slice(&self, text: &str) -> Option<String> {
        let (from, length) = self.range();
        let from = usize::try_from(from).ok()?;
        let end = from.checked_add(usize::try_from(length).ok()?)?;
        let units: Vec<u16> = text.encode_utf16().collect();
        let covered = units.get(from..end)?;
        String::from_utf16(covered).ok()
    }
}
