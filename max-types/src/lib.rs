//! Typed Max Bot API objects, updates and request bodies.
//!
//! Every type mirrors one JSON object of the platform API and derives
//! serde's `Serialize`/`Deserialize`, so the whole model round-trips through
//! `serde_json` without loss.
//!
//! # Overview
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`user`]       | [`User`], [`BotInfo`], [`BotCommand`]                      |
//! | [`chat`]       | [`Chat`], [`ChatList`], [`Recipient`], [`ChatType`]        |
//! | [`message`]    | [`Message`], [`MessageBody`], [`LinkedMessage`]            |
//! | [`attachment`] | Received [`Attachment`]s and keyboard [`Button`]s          |
//! | [`markup`]     | Text [`MarkupElement`]s                                    |
//! | [`update`]     | The [`Update`] hierarchy keyed by `update_type`            |
//! | [`request`]    | Outgoing bodies: [`NewMessageBody`], [`CallbackAnswer`], … |
//! | [`result`]     | Response envelopes and the platform [`ApiError`]           |
//!
//! # Decoding a webhook payload
//!
//! ```rust
//! use max_types::Update;
//!
//! let json = r#"{"update_type":"bot_started","timestamp":1,"chat_id":7,
//!                "user":{"user_id":42,"first_name":"Ann","is_bot":false}}"#;
//! let update: Update = serde_json::from_str(json).unwrap();
//! assert_eq!(update.chat_id(), Some(7));
//! ```

#![deny(unsafe_code)]
#![allow(clippy::large_enum_variant)]

pub mod attachment;
pub mod chat;
pub mod markup;
pub mod message;
pub mod request;
pub mod result;
pub mod update;
pub mod user;

pub use attachment::{Attachment, Button, Intent, Keyboard};
pub use chat::{Chat, ChatList, ChatStatus, ChatType, Image, Recipient};
pub use markup::{MarkupElement, UnknownMarkup};
pub use message::{LinkedMessage, Message, MessageBody, MessageLinkType, MessageList, MessageStat};
pub use request::{
    AttachmentRequest, CallbackAnswer, NewMessageBody, NewMessageLink, SubscriptionRequestBody,
    TextFormat,
};
pub use result::{
    ApiError, Callback, GetSubscriptionsResult, SendMessageResult, SimpleQueryResult, Subscription,
};
pub use update::{RawUpdate, UnknownUpdateType, Update, UpdateList, UpdateType};
pub use user::{BotCommand, BotInfo, User};
