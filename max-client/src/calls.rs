//! Bot API methods as typed values.
//!
//! Each call is a plain struct implementing [`ApiCall`]; its associated
//! `Response` is the type the platform answers with, so
//! [`crate::Client::decode`] always knows what to decode.

use std::borrow::Cow;

use http::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use max_types::{
    BotInfo, CallbackAnswer, Chat, ChatList, GetSubscriptionsResult, Message, NewMessageBody,
    SendMessageResult, SimpleQueryResult, SubscriptionRequestBody, UpdateList, UpdateType,
};

/// An API method that can be encoded into an HTTP request.
pub trait ApiCall {
    /// The decoded response type.
    type Response: DeserializeOwned;
    /// The JSON body type; `()` for calls without a body.
    type Body: Serialize + ?Sized;

    const METHOD: Method;

    /// Path relative to the API root, one entry per segment.
    ///
    /// Segments are percent-encoded on their own, so an id containing `/`
    /// stays a single segment.
    fn path(&self) -> Vec<Cow<'static, str>>;

    /// Query parameters, in order.
    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    fn body(&self) -> Option<&Self::Body> {
        None
    }
}

fn push_opt(query: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<impl ToString>) {
    if let Some(v) = value {
        query.push((key, v.to_string()));
    }
}

// ─── Bot ──────────────────────────────────────────────────────────────────────

/// `GET /me`
#[derive(Clone, Copy, Debug, Default)]
pub struct GetMyInfo;

impl ApiCall for GetMyInfo {
    type Response = BotInfo;
    type Body = ();
    const METHOD: Method = Method::GET;

    fn path(&self) -> Vec<Cow<'static, str>> { vec!["me".into()] }
}

// ─── Chats ────────────────────────────────────────────────────────────────────

/// `GET /chats`: one page of the chats the bot participates in.
#[derive(Clone, Debug, Default)]
pub struct GetChats {
    /// Page size, 1..=100.
    pub count: Option<u32>,
    /// Marker from the previous page.
    pub marker: Option<i64>,
}

impl ApiCall for GetChats {
    type Response = ChatList;
    type Body = ();
    const METHOD: Method = Method::GET;

    fn path(&self) -> Vec<Cow<'static, str>> { vec!["chats".into()] }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut q = Vec::new();
        push_opt(&mut q, "count", self.count);
        push_opt(&mut q, "marker", self.marker);
        q
    }
}

/// `GET /chats/{chat_id}`
#[derive(Clone, Copy, Debug)]
pub struct GetChat {
    pub chat_id: i64,
}

impl ApiCall for GetChat {
    type Response = Chat;
    type Body = ();
    const METHOD: Method = Method::GET;

    fn path(&self) -> Vec<Cow<'static, str>> {
        vec!["chats".into(), self.chat_id.to_string().into()]
    }
}

// ─── Messages ─────────────────────────────────────────────────────────────────

/// `POST /messages`: send to a chat (`chat_id`) or a user's dialog (`user_id`).
#[derive(Clone, Debug)]
pub struct SendMessage {
    pub chat_id: Option<i64>,
    pub user_id: Option<i64>,
    pub disable_link_preview: Option<bool>,
    pub body: NewMessageBody,
}

impl SendMessage {
    pub fn to_chat(chat_id: i64, body: NewMessageBody) -> Self {
        Self { chat_id: Some(chat_id), user_id: None, disable_link_preview: None, body }
    }

    pub fn to_user(user_id: i64, body: NewMessageBody) -> Self {
        Self { chat_id: None, user_id: Some(user_id), disable_link_preview: None, body }
    }

    pub fn disable_link_preview(mut self, v: bool) -> Self {
        self.disable_link_preview = Some(v);
        self
    }
}

impl ApiCall for SendMessage {
    type Response = SendMessageResult;
    type Body = NewMessageBody;
    const METHOD: Method = Method::POST;

    fn path(&self) -> Vec<Cow<'static, str>> { vec!["messages".into()] }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut q = Vec::new();
        push_opt(&mut q, "user_id", self.user_id);
        push_opt(&mut q, "chat_id", self.chat_id);
        push_opt(&mut q, "disable_link_preview", self.disable_link_preview);
        q
    }

    fn body(&self) -> Option<&NewMessageBody> { Some(&self.body) }
}

/// `PUT /messages`: replace the content of a sent message.
#[derive(Clone, Debug)]
pub struct EditMessage {
    pub message_id: String,
    pub body: NewMessageBody,
}

impl ApiCall for EditMessage {
    type Response = SimpleQueryResult;
    type Body = NewMessageBody;
    const METHOD: Method = Method::PUT;

    fn path(&self) -> Vec<Cow<'static, str>> { vec!["messages".into()] }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![("message_id", self.message_id.clone())]
    }

    fn body(&self) -> Option<&NewMessageBody> { Some(&self.body) }
}

/// `DELETE /messages`
#[derive(Clone, Debug)]
pub struct DeleteMessage {
    pub message_id: String,
}

impl ApiCall for DeleteMessage {
    type Response = SimpleQueryResult;
    type Body = ();
    const METHOD: Method = Method::DELETE;

    fn path(&self) -> Vec<Cow<'static, str>> { vec!["messages".into()] }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![("message_id", self.message_id.clone())]
    }
}

/// `GET /messages/{message_id}`
#[derive(Clone, Debug)]
pub struct GetMessage {
    pub message_id: String,
}

impl ApiCall for GetMessage {
    type Response = Message;
    type Body = ();
    const METHOD: Method = Method::GET;

    fn path(&self) -> Vec<Cow<'static, str>> {
        vec!["messages".into(), self.message_id.clone().into()]
    }
}

/// `POST /answers`: answer a button press.
#[derive(Clone, Debug)]
pub struct AnswerCallback {
    pub callback_id: String,
    pub answer: CallbackAnswer,
}

impl ApiCall for AnswerCallback {
    type Response = SimpleQueryResult;
    type Body = CallbackAnswer;
    const METHOD: Method = Method::POST;

    fn path(&self) -> Vec<Cow<'static, str>> { vec!["answers".into()] }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![("callback_id", self.callback_id.clone())]
    }

    fn body(&self) -> Option<&CallbackAnswer> { Some(&self.answer) }
}

// ─── Updates ──────────────────────────────────────────────────────────────────

/// Largest page the platform serves per poll.
pub const MAX_UPDATES_LIMIT: u32 = 1000;
/// Longest long-poll wait the platform accepts, in seconds.
pub const MAX_UPDATES_TIMEOUT: u32 = 90;

/// `GET /updates`: one long-poll request.
#[derive(Clone, Debug, Default)]
pub struct GetUpdates {
    pub limit: Option<u32>,
    /// Seconds to hold the request open when no update is pending.
    pub timeout: Option<u32>,
    pub marker: Option<i64>,
    /// Only deliver these kinds; all kinds when empty.
    pub types: Vec<UpdateType>,
}

impl GetUpdates {
    /// Set the page size, clamped to `1..=MAX_UPDATES_LIMIT`.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit.clamp(1, MAX_UPDATES_LIMIT));
        self
    }

    /// Set the long-poll timeout, clamped to `0..=MAX_UPDATES_TIMEOUT`.
    pub fn timeout(mut self, secs: u32) -> Self {
        self.timeout = Some(secs.min(MAX_UPDATES_TIMEOUT));
        self
    }

    pub fn marker(mut self, marker: Option<i64>) -> Self {
        self.marker = marker;
        self
    }
}

impl ApiCall for GetUpdates {
    type Response = UpdateList;
    type Body = ();
    const METHOD: Method = Method::GET;

    fn path(&self) -> Vec<Cow<'static, str>> { vec!["updates".into()] }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut q = Vec::new();
        push_opt(&mut q, "limit", self.limit);
        push_opt(&mut q, "timeout", self.timeout);
        push_opt(&mut q, "marker", self.marker);
        if !self.types.is_empty() {
            q.push(("types", UpdateType::join(&self.types)));
        }
        q
    }
}

// ─── Subscriptions ────────────────────────────────────────────────────────────

/// `GET /subscriptions`
#[derive(Clone, Copy, Debug, Default)]
pub struct GetSubscriptions;

impl ApiCall for GetSubscriptions {
    type Response = GetSubscriptionsResult;
    type Body = ();
    const METHOD: Method = Method::GET;

    fn path(&self) -> Vec<Cow<'static, str>> { vec!["subscriptions".into()] }
}

/// `POST /subscriptions`: switch the bot to webhook delivery.
#[derive(Clone, Debug)]
pub struct Subscribe {
    pub body: SubscriptionRequestBody,
}

impl ApiCall for Subscribe {
    type Response = SimpleQueryResult;
    type Body = SubscriptionRequestBody;
    const METHOD: Method = Method::POST;

    fn path(&self) -> Vec<Cow<'static, str>> { vec!["subscriptions".into()] }

    fn body(&self) -> Option<&SubscriptionRequestBody> { Some(&self.body) }
}

/// `DELETE /subscriptions`: stop webhook delivery to `url`.
#[derive(Clone, Debug)]
pub struct Unsubscribe {
    pub url: String,
}

impl ApiCall for Unsubscribe {
    type Response = SimpleQueryResult;
    type Body = ();
    const METHOD: Method = Method::DELETE;

    fn path(&self) -> Vec<Cow<'static, str>> { vec!["subscriptions".into()] }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![("url", self.url.clone())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_updates_clamps_and_joins_types() {
        let call = GetUpdates {
            types: vec![UpdateType::MessageCreated, UpdateType::MessageCallback],
            ..Default::default()
        }
        .limit(5000)
        .timeout(300)
        .marker(Some(42));

        assert_eq!(call.query(), vec![
            ("limit", "1000".to_string()),
            ("timeout", "90".to_string()),
            ("marker", "42".to_string()),
            ("types", "message_created,message_callback".to_string()),
        ]);
    }

    #[test]
    fn send_message_targets_chat_or_user() {
        let to_chat = SendMessage::to_chat(-5, NewMessageBody::text("hi"));
        assert_eq!(to_chat.query(), vec![("chat_id", "-5".to_string())]);

        let to_user = SendMessage::to_user(7, NewMessageBody::text("hi")).disable_link_preview(true);
        assert_eq!(to_user.query(), vec![
            ("user_id", "7".to_string()),
            ("disable_link_preview", "true".to_string()),
        ]);
    }

    #[test]
    fn get_chat_path_includes_id() {
        assert_eq!(GetChat { chat_id: -100 }.path(), ["chats", "-100"]);
    }
}
