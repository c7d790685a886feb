use max_types::attachment::Attachment;
use max_types::{
    Button, ChatStatus, ChatType, Intent, MarkupElement, MessageLinkType, UnknownMarkup, Update,
    UpdateList, UpdateType,
};
use serde_json::Value;

const WEBHOOK_MESSAGE_CREATED: &str = include_str!("fixtures/webhook_message_created.json");
const POLLING_DIALOG: &str = include_str!("fixtures/polling_dialog.json");
const POLLING_MIXED: &str = include_str!("fixtures/polling_mixed.json");
const POLLING_UNFAMILIAR: &str = include_str!("fixtures/polling_unfamiliar_values.json");

/// Decode a wire payload, check it serializes back to the same JSON and
/// return the update.
fn decode_wire(json: &str) -> Update {
    let update: Update = serde_json::from_str(json).unwrap();
    let original: Value = serde_json::from_str(json).unwrap();
    assert_eq!(serde_json::to_value(&update).unwrap(), original);
    update
}

// ── Discriminator dispatch ────────────────────────────────────────────────────

#[test]
fn webhook_payload_is_message_created() {
    let update: Update = serde_json::from_str(WEBHOOK_MESSAGE_CREATED).unwrap();
    assert_eq!(update.update_type(), Some(UpdateType::MessageCreated));

    let Update::MessageCreated(created) = &update else {
        panic!("expected message_created, got {update:?}");
    };
    let message = &created.message;
    assert_eq!(message.body.mid, "mid.ffffc094e01caac1019b2c3739701ac6");
    assert_eq!(message.text(), Some("3"));
    assert_eq!(message.recipient.chat_type, ChatType::Chat);
    assert_eq!(message.chat_id(), Some(-69729329042751));
    assert_eq!(message.sender_id(), Some(100625215));
    assert_eq!(update.timestamp(), Some(1765973375344));
}

#[test]
fn polling_payload_reads_body_from_message_key() {
    let list: UpdateList = serde_json::from_str(POLLING_DIALOG).unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list.marker, Some(2546143));

    let update = &list.updates[0];
    let message = update.message().expect("message_created carries a message");
    assert_eq!(message.body.seq, 115572529872854537);
    assert_eq!(message.text(), Some("5"));
    assert_eq!(message.recipient.user_id, Some(92478166));
    assert_eq!(update.user_locale(), Some("ru"));
}

#[test]
fn mixed_batch_dispatches_each_kind() {
    let list: UpdateList = serde_json::from_str(POLLING_MIXED).unwrap();
    let kinds: Vec<&str> = list.updates.iter().map(Update::type_name).collect();
    assert_eq!(kinds, ["message_callback", "bot_added", "message_removed", "story_reacted"]);

    match &list.updates[0] {
        Update::MessageCallback(cb) => {
            assert_eq!(cb.callback.payload.as_deref(), Some("vote:yes"));
            assert_eq!(cb.callback.user.first_name, "Anna");
        }
        other => panic!("unexpected {other:?}"),
    }
    match &list.updates[1] {
        Update::BotAdded(added) => assert!(!added.is_channel),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(list.updates[2].chat_id(), Some(-69729329042751));
}

#[test]
fn nested_attachments_and_markup_decode() {
    let list: UpdateList = serde_json::from_str(POLLING_MIXED).unwrap();
    let body = &list.updates[0].message().unwrap().body;

    let Attachment::InlineKeyboard { payload } = &body.attachments()[0] else {
        panic!("expected inline keyboard");
    };
    assert_eq!(payload.buttons[0].len(), 2);
    assert_eq!(payload.buttons[0][1], Button::link("Rules", "https://max.ru/rules"));

    let markup = body.markup.as_deref().unwrap();
    assert_eq!(markup[0], MarkupElement::Strong { from: 5, length: 3 });
    assert_eq!(markup[0].slice(body.text().unwrap()).as_deref(), Some("now"));
}

// ── Unknown kinds ─────────────────────────────────────────────────────────────

#[test]
fn unknown_kind_is_kept_whole() {
    let list: UpdateList = serde_json::from_str(POLLING_MIXED).unwrap();
    let Update::Unknown(raw) = &list.updates[3] else {
        panic!("expected unknown update");
    };
    assert_eq!(raw.type_name(), "story_reacted");
    assert_eq!(raw.fields["reaction"], "fire");
    assert_eq!(list.updates[3].update_type(), None);
    assert_eq!(list.updates[3].chat_id(), Some(5));
    assert_eq!(list.updates[3].timestamp(), Some(1765982632800));
}

#[test]
fn unknown_kind_serializes_verbatim() {
    let json = r#"{"chat_id":5,"reaction":"fire","timestamp":1,"update_type":"story_reacted"}"#;
    let update: Update = serde_json::from_str(json).unwrap();
    assert_eq!(serde_json::to_string(&update).unwrap(), json);
}

#[test]
fn unfamiliar_enum_values_do_not_break_the_batch() {
    let list: UpdateList = serde_json::from_str(POLLING_UNFAMILIAR).unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(list.marker, Some(10319100));

    let message = list.updates[0].message().unwrap();
    assert_eq!(message.recipient.chat_type, ChatType::Unknown);
    assert_eq!(message.link.as_ref().unwrap().kind, MessageLinkType::Unknown);

    let Attachment::InlineKeyboard { payload } = &message.body.attachments()[0] else {
        panic!("expected inline keyboard");
    };
    assert!(matches!(payload.buttons[0][0], Button::Callback { intent: Intent::Unknown, .. }));

    let markup = message.body.markup.as_deref().unwrap();
    assert_eq!(
        markup[0],
        MarkupElement::Unknown(UnknownMarkup { kind: "blockquote".into(), from: 3, length: 6 })
    );
    assert_eq!(markup[0].slice(message.text().unwrap()).as_deref(), Some("quoted"));
    assert_eq!(markup[1], MarkupElement::Strong { from: 10, length: 5 });

    let Update::MessageChatCreated(created) = &list.updates[1] else {
        panic!("expected message_chat_created");
    };
    assert_eq!(created.chat.status, ChatStatus::Unknown);
    assert_eq!(list.updates[2].update_type(), Some(UpdateType::BotAdded));
}

// ── Every kind decodes from its wire name ─────────────────────────────────────

#[test]
fn message_edited_from_wire() {
    let update = decode_wire(include_str!("fixtures/kinds/message_edited.json"));
    let Update::MessageEdited(edited) = &update else { panic!("got {update:?}") };
    assert_eq!(edited.message.text(), Some("fixed typo"));
}

#[test]
fn bot_started_from_wire() {
    let update = decode_wire(include_str!("fixtures/kinds/bot_started.json"));
    let Update::BotStarted(started) = &update else { panic!("got {update:?}") };
    assert_eq!(started.payload.as_deref(), Some("ref-landing"));
    assert_eq!(update.user_locale(), Some("ru"));
}

#[test]
fn bot_stopped_from_wire() {
    let update = decode_wire(include_str!("fixtures/kinds/bot_stopped.json"));
    let Update::BotStopped(stopped) = &update else { panic!("got {update:?}") };
    assert_eq!(stopped.chat_id, 92478166);
    assert_eq!(stopped.user.first_name, "Anna");
}

#[test]
fn bot_removed_from_wire() {
    let update = decode_wire(include_str!("fixtures/kinds/bot_removed.json"));
    let Update::BotRemoved(removed) = &update else { panic!("got {update:?}") };
    assert!(removed.is_channel);
}

#[test]
fn user_added_from_wire() {
    let update = decode_wire(include_str!("fixtures/kinds/user_added.json"));
    let Update::UserAdded(added) = &update else { panic!("got {update:?}") };
    assert_eq!(added.inviter_id, Some(100625215));
    assert_eq!(added.user.user_id, 555);
}

#[test]
fn user_removed_from_wire() {
    let update = decode_wire(include_str!("fixtures/kinds/user_removed.json"));
    let Update::UserRemoved(removed) = &update else { panic!("got {update:?}") };
    assert_eq!(removed.admin_id, Some(100625215));
}

#[test]
fn chat_title_changed_from_wire() {
    let update = decode_wire(include_str!("fixtures/kinds/chat_title_changed.json"));
    let Update::ChatTitleChanged(changed) = &update else { panic!("got {update:?}") };
    assert_eq!(changed.title, "Course chat 2026");
}

#[test]
fn message_chat_created_from_wire() {
    let update = decode_wire(include_str!("fixtures/kinds/message_chat_created.json"));
    let Update::MessageChatCreated(created) = &update else { panic!("got {update:?}") };
    assert_eq!(created.chat.chat_id, -71000000000042);
    assert_eq!(created.start_payload.as_deref(), Some("ticket-42"));
    assert_eq!(update.chat_id(), Some(-71000000000042));
}

#[test]
fn dialog_kinds_from_wire() {
    let muted = decode_wire(include_str!("fixtures/kinds/dialog_muted.json"));
    let Update::DialogMuted(dialog) = &muted else { panic!("got {muted:?}") };
    assert_eq!(dialog.muted_until, Some(1766076400000));

    let unmuted = decode_wire(include_str!("fixtures/kinds/dialog_unmuted.json"));
    assert!(matches!(unmuted, Update::DialogUnmuted(ref d) if d.muted_until.is_none()));

    let cleared = decode_wire(include_str!("fixtures/kinds/dialog_cleared.json"));
    assert!(matches!(cleared, Update::DialogCleared(ref d) if d.chat_id == 92478166));

    let removed = decode_wire(include_str!("fixtures/kinds/dialog_removed.json"));
    assert!(matches!(removed, Update::DialogRemoved(_)));
    assert_eq!(removed.user_locale(), Some("ru"));
}

// ── Malformed discriminators and payloads ─────────────────────────────────────

#[test]
fn missing_discriminator_is_an_error() {
    let err = serde_json::from_str::<Update>(r#"{"timestamp":1}"#).unwrap_err();
    assert!(err.to_string().contains("update_type"), "{err}");
}

#[test]
fn non_string_discriminator_is_an_error() {
    let err = serde_json::from_str::<Update>(r#"{"update_type":7,"timestamp":1}"#).unwrap_err();
    assert!(err.to_string().contains("must be a string"), "{err}");
}

#[test]
fn known_kind_with_bad_payload_does_not_fall_through() {
    // message_created without a message
    let err = serde_json::from_str::<Update>(r#"{"update_type":"message_created","timestamp":1}"#)
        .unwrap_err();
    assert!(err.to_string().contains("message_created"), "{err}");
}

#[test]
fn non_object_update_is_an_error() {
    assert!(serde_json::from_str::<Update>("[1,2,3]").is_err());
}

// ── Serialization writes the discriminator ────────────────────────────────────

#[test]
fn serialized_update_carries_update_type() {
    let update: Update = serde_json::from_str(WEBHOOK_MESSAGE_CREATED).unwrap();
    let value = serde_json::to_value(&update).unwrap();
    assert_eq!(value["update_type"], "message_created");
    // always written back under `body`
    assert!(value["message"].get("body").is_some());

    let back: Update = serde_json::from_value(value).unwrap();
    assert_eq!(back, update);
}

// ── UpdateType ────────────────────────────────────────────────────────────────

#[test]
fn update_type_names_round_trip() {
    for kind in UpdateType::ALL {
        assert_eq!(kind.as_str().parse::<UpdateType>().unwrap(), *kind);
    }
    assert!("nope".parse::<UpdateType>().is_err());
}

#[test]
fn update_type_join() {
    let joined = UpdateType::join(&[UpdateType::MessageCreated, UpdateType::BotStarted]);
    assert_eq!(joined, "message_created,bot_started");
}
