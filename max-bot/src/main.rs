//! max-bot: showcase bot built with max-client.
//!
//! Reads webhook deliveries or long-poll responses (JSON files given as
//! arguments, or stdin), dispatches them like a live bot would and prints the
//! HTTP requests it would send back.
//!
//! # Usage
//! ```text
//! MAX_BOT_TOKEN=... cargo run -p max-bot -- update.json updates.json
//! cat update.json | cargo run -p max-bot
//! ```
//!
//! Without `MAX_BOT_TOKEN` the requests are planned with a placeholder token.

use std::fs;
use std::io::{self, Read};

use chrono::Utc;
use max_client::calls::{AnswerCallback, SendMessage};
use max_client::http::Request;
use max_client::types::{
    AttachmentRequest, Button, CallbackAnswer, Keyboard, Message, NewMessageBody, TextFormat,
    Update, UpdateList,
};
use max_client::{Client, Config, Serializer, UpdateCursor};

const PLACEHOLDER_TOKEN: &str = "dry-run";

type BoxError = Box<dyn std::error::Error>;

fn main() {
    if std::env::var("RUST_LOG").is_err() {
        unsafe { std::env::set_var("RUST_LOG", "max_client=info,max_bot=info"); }
    }
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("✗ {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), BoxError> {
    let config = Config::from_env().unwrap_or_else(|e| {
        log::warn!("{e}; planning requests with a placeholder token");
        Config::with_token(PLACEHOLDER_TOKEN)
    });
    let client = Client::new(config)?;
    let mut cursor = UpdateCursor::new();

    let inputs: Vec<String> = std::env::args().skip(1).collect();
    if inputs.is_empty() {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        handle_payload(&client, &mut cursor, "<stdin>", &buf)?;
    } else {
        for path in &inputs {
            let buf = fs::read(path)?;
            handle_payload(&client, &mut cursor, path, &buf)?;
        }
    }

    if let Some(marker) = cursor.marker() {
        log::info!("next poll resumes from marker {marker}");
    }
    Ok(())
}

// ─── Input ────────────────────────────────────────────────────────────────────

/// A payload is either one webhook update or a whole `GET /updates` page.
fn handle_payload(client: &Client, cursor: &mut UpdateCursor, source: &str, bytes: &[u8]) -> Result<(), BoxError> {
    let Some(shape) = client.serializer().deserialize_bytes::<serde_json::Value>(Some(bytes))? else {
        log::warn!("{source}: empty payload skipped");
        return Ok(());
    };

    let updates = if shape.get("updates").is_some() {
        let list: UpdateList = serde_json::from_value(shape)?;
        log::info!("{source}: {} update(s) from long poll", list.len());
        cursor.advance(list)
    } else {
        vec![serde_json::from_value::<Update>(shape)?]
    };

    for update in updates {
        for reply in dispatch(&update) {
            print_request(&reply.encode(client)?);
        }
    }
    Ok(())
}

fn print_request(request: &Request<Vec<u8>>) {
    println!("{} {}", request.method(), request.uri());
    if !request.body().is_empty() {
        println!("{}\n", String::from_utf8_lossy(request.body()));
    }
}

// ─── Central dispatcher ───────────────────────────────────────────────────────

/// An outgoing call planned in response to an update.
#[derive(Debug)]
enum Reply {
    Send(SendMessage),
    Answer(AnswerCallback),
}

impl Reply {
    fn encode(&self, client: &Client) -> Result<Request<Vec<u8>>, max_client::ClientError> {
        match self {
            Self::Send(call) => client.encode(call),
            Self::Answer(call) => client.encode(call),
        }
    }
}

fn dispatch(update: &Update) -> Vec<Reply> {
    match update {
        Update::MessageCreated(created) => {
            let msg = &created.message;
            // Only commands from people; bots talking to each other loop forever.
            if msg.sender.as_ref().is_some_and(|s| s.is_bot) {
                return Vec::new();
            }
            let Some(text) = msg.text().map(str::trim).filter(|t| t.starts_with('/')) else {
                return Vec::new();
            };
            let (cmd, arg) = split_command(text);
            log::info!("command {cmd} in chat {:?}", msg.chat_id());

            let body = match cmd.as_str() {
                "/start" => start_body(),
                "/help" => help_body(),
                "/ping" => NewMessageBody::text("🏓 Pong!"),
                "/time" => time_body(),
                "/id" => id_body(msg),
                "/echo" => echo_body(&arg),
                "/upper" => transform_body(&arg, |s| s.to_uppercase()),
                "/lower" => transform_body(&arg, |s| s.to_lowercase()),
                "/reverse" => transform_body(&arg, |s| s.chars().rev().collect()),
                "/count" => count_body(&arg),
                _ => NewMessageBody::text("❓ Unknown command. Use /help to see all commands."),
            };
            reply_to(msg, body).into_iter().collect()
        }

        Update::MessageCallback(cb) => {
            let text = match cb.callback.payload.as_deref().unwrap_or("") {
                "cb:ping" => "🏓 Pong!".to_string(),
                "cb:time" => Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
                "cb:help" => "Use /help to see all commands".to_string(),
                _ => "🤷 Unknown action".to_string(),
            };
            vec![Reply::Answer(AnswerCallback {
                callback_id: cb.callback.callback_id.clone(),
                answer:      CallbackAnswer::notification(text),
            })]
        }

        Update::BotStarted(started) => {
            log::info!("dialog opened by {}", started.user.full_name());
            vec![Reply::Send(SendMessage::to_chat(started.chat_id, start_body()))]
        }

        Update::Unknown(raw) => {
            log::debug!("ignoring unknown update kind {}", raw.type_name());
            Vec::new()
        }

        other => {
            log::debug!("no handler for {}", other.type_name());
            Vec::new()
        }
    }
}

fn reply_to(msg: &Message, body: NewMessageBody) -> Option<Reply> {
    let body = body.reply_to(msg.mid());
    let call = match (msg.chat_id(), msg.sender_id()) {
        (Some(chat_id), _) => SendMessage::to_chat(chat_id, body),
        (None, Some(user_id)) => SendMessage::to_user(user_id, body),
        (None, None) => {
            log::warn!("message {} has no chat or sender to answer", msg.mid());
            return None;
        }
    };
    Some(Reply::Send(call))
}

// ─── Handlers ─────────────────────────────────────────────────────────────────

fn start_body() -> NewMessageBody {
    let keyboard = Keyboard::new([
        vec![Button::callback("🏓 Ping", "cb:ping"), Button::callback("🕐 Time", "cb:time")],
        vec![Button::callback("📖 Help", "cb:help")],
        vec![Button::link("Bot API docs", "https://dev.max.ru/docs-api")],
    ]);
    NewMessageBody::text("👋 **Welcome to max-bot!**\n\nUse the buttons below or send /help.")
        .format(TextFormat::Markdown)
        .attach(AttachmentRequest::keyboard(keyboard))
}

fn help_body() -> NewMessageBody {
    NewMessageBody::text(
        "📖 **Commands**\n\n\
        /ping: pong 🏓\n\
        /time: UTC date and time 🕐\n\
        /id: your and this chat's IDs\n\
        /echo `<text>`: echo text\n\
        /upper, /lower, /reverse `<text>`: rewrite text\n\
        /count `<text>`: text stats",
    )
    .format(TextFormat::Markdown)
}

fn time_body() -> NewMessageBody {
    let now = Utc::now();
    NewMessageBody::text(format!(
        "🕐 **Time**\n\n**Date:** {}\n**Time:** `{}` UTC\n**Unix:** `{}`",
        now.format("%A, %B %d %Y"),
        now.format("%H:%M:%S"),
        now.timestamp(),
    ))
    .format(TextFormat::Markdown)
}

fn id_body(msg: &Message) -> NewMessageBody {
    let user = msg.sender_id().map_or_else(|| "_(unknown)_".to_string(), |id| format!("`{id}`"));
    let chat = msg.chat_id().map_or_else(|| "_(dialog)_".to_string(), |id| format!("`{id}`"));
    NewMessageBody::text(format!("🪪 **IDs**\n\n**User:** {user}\n**Chat:** {chat}"))
        .format(TextFormat::Markdown)
}

fn echo_body(arg: &str) -> NewMessageBody {
    if arg.is_empty() {
        NewMessageBody::text("💬 Usage: /echo <text>")
    } else {
        NewMessageBody::text(format!("💬 {arg}"))
    }
}

fn transform_body(arg: &str, f: impl Fn(&str) -> String) -> NewMessageBody {
    if arg.is_empty() {
        NewMessageBody::text("Usage: <command> <text>")
    } else {
        NewMessageBody::text(f(arg))
    }
}

fn count_body(arg: &str) -> NewMessageBody {
    if arg.is_empty() {
        return NewMessageBody::text("📊 Usage: /count <text>");
    }
    NewMessageBody::text(format!(
        "📊 **Stats**\n\n**Chars:** `{}`\n**Bytes:** `{}`\n**Words:** `{}`\n**Lines:** `{}`",
        arg.chars().count(),
        arg.len(),
        arg.split_whitespace().count(),
        arg.lines().count(),
    ))
    .format(TextFormat::Markdown)
}

// ─── Utilities ────────────────────────────────────────────────────────────────

/// Split `/cmd@bot rest` into a lowercase command and its trimmed argument.
fn split_command(text: &str) -> (String, String) {
    let (raw, rest) = text.split_once(char::is_whitespace).unwrap_or((text, ""));
    let cmd = raw.split_once('@').map_or(raw, |(c, _)| c);
    (cmd.to_ascii_lowercase(), rest.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn created(text: &str, is_bot: bool) -> Update {
        let json = serde_json::json!({
            "update_type": "message_created",
            "timestamp": 1,
            "message": {
                "recipient": {"chat_id": -5, "chat_type": "chat"},
                "timestamp": 1,
                "sender": {"user_id": 9, "first_name": "Ann", "is_bot": is_bot},
                "body": {"mid": "mid.1", "seq": 1, "text": text}
            }
        });
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn split_command_strips_mention_and_lowercases() {
        assert_eq!(split_command("/Echo@max_bot  hi there "), ("/echo".into(), "hi there".into()));
        assert_eq!(split_command("/ping"), ("/ping".into(), String::new()));
    }

    #[test]
    fn command_is_answered_in_its_chat() {
        let replies = dispatch(&created("/upper abc", false));
        assert_eq!(replies.len(), 1);
        let Reply::Send(call) = &replies[0] else { panic!("expected a message") };
        assert_eq!(call.chat_id, Some(-5));
        assert_eq!(call.body.text.as_deref(), Some("ABC"));
        assert_eq!(call.body.link.as_ref().map(|l| l.mid.as_str()), Some("mid.1"));
    }

    #[test]
    fn plain_text_and_bots_are_ignored() {
        assert!(dispatch(&created("hello", false)).is_empty());
        assert!(dispatch(&created("/ping", true)).is_empty());
    }

    #[test]
    fn callback_press_is_answered() {
        let json = serde_json::json!({
            "update_type": "message_callback",
            "timestamp": 1,
            "callback": {
                "timestamp": 1,
                "callback_id": "cb.7",
                "payload": "cb:ping",
                "user": {"user_id": 9, "first_name": "Ann"}
            }
        });
        let update: Update = serde_json::from_value(json).unwrap();
        let replies = dispatch(&update);
        assert_eq!(replies.len(), 1);
        let Reply::Answer(call) = &replies[0] else { panic!("expected an answer") };
        assert_eq!(call.callback_id, "cb.7");
    }

    #[test]
    fn unknown_updates_plan_nothing() {
        let json = serde_json::json!({"update_type": "story_reacted", "timestamp": 1});
        let update: Update = serde_json::from_value(json).unwrap();
        assert!(dispatch(&update).is_empty());
    }

    #[test]
    fn long_poll_page_advances_cursor() {
        let client = Client::new(Config::with_token("t")).unwrap();
        let mut cursor = UpdateCursor::new();
        let page = br#"{"updates":[],"marker":77}"#;
        handle_payload(&client, &mut cursor, "test", page).unwrap();
        assert_eq!(cursor.marker(), Some(77));
    }

    #[test]
    fn single_update_and_bad_page_payloads() {
        let client = Client::new(Config::with_token("t")).unwrap();
        let mut cursor = UpdateCursor::new();

        let single = br#"{"update_type":"story_reacted","timestamp":1}"#;
        handle_payload(&client, &mut cursor, "test", single).unwrap();
        assert_eq!(cursor.marker(), None);

        let bad_page = br#"{"updates":[{"update_type":"message_created","timestamp":1}]}"#;
        assert!(handle_payload(&client, &mut cursor, "test", bad_page).is_err());
        assert!(handle_payload(&client, &mut cursor, "test", b"").is_ok());
    }
}
