use http::Request;
use max_client::types::Update;
use max_client::webhook::SECRET_HEADER;
use max_client::{Client, Config, WebhookError, WebhookReceiver, parse_update};

const WEBHOOK_MESSAGE_CREATED: &[u8] = include_bytes!("fixtures/webhook_message_created.json");

#[test]
fn parse_update_without_secret() {
    let update = parse_update(WEBHOOK_MESSAGE_CREATED).unwrap();
    assert!(matches!(update, Update::MessageCreated(_)));
    assert!(update.message().unwrap().text().is_some());
}

#[test]
fn matching_secret_is_accepted() {
    let receiver = WebhookReceiver::new(Some("s3cret".into()));
    let update = receiver.receive(Some("s3cret"), WEBHOOK_MESSAGE_CREATED).unwrap();
    assert_eq!(update.type_name(), "message_created");
}

#[test]
fn wrong_or_missing_secret_is_rejected() {
    let receiver = WebhookReceiver::new(Some("s3cret".into()));
    assert!(matches!(
        receiver.receive(Some("s3creT"), WEBHOOK_MESSAGE_CREATED),
        Err(WebhookError::SecretMismatch)
    ));
    assert!(matches!(
        receiver.receive(Some("s3cret-longer"), WEBHOOK_MESSAGE_CREATED),
        Err(WebhookError::SecretMismatch)
    ));
    assert!(matches!(
        receiver.receive(None, WEBHOOK_MESSAGE_CREATED),
        Err(WebhookError::SecretMismatch)
    ));
}

#[test]
fn empty_body_is_rejected() {
    assert!(matches!(parse_update(b""), Err(WebhookError::Empty)));
}

#[test]
fn malformed_body_is_a_payload_error() {
    assert!(matches!(parse_update(b"{\"update_type\":"), Err(WebhookError::Payload(_))));
    assert!(matches!(parse_update(b"{\"timestamp\":1}"), Err(WebhookError::Payload(_))));
}

#[test]
fn receive_from_http_request_uses_client_secret() {
    let client = Client::new(Config::with_token("t").webhook_secret("s3cret")).unwrap();
    let receiver = client.webhook_receiver();

    let request = Request::post("/hook")
        .header(SECRET_HEADER, "s3cret")
        .body(WEBHOOK_MESSAGE_CREATED.to_vec())
        .unwrap();
    let update = receiver.receive_request(&request).unwrap();
    assert_eq!(update.chat_id(), Some(-69729329042751));

    let unsigned = Request::post("/hook").body(WEBHOOK_MESSAGE_CREATED.to_vec()).unwrap();
    assert!(matches!(receiver.receive_request(&unsigned), Err(WebhookError::SecretMismatch)));
}
