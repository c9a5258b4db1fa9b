use std::cell::RefCell;
use std::rc::Rc;

use futures::executor::block_on;

use super::*;
use crate::net::types::UserEnvelope;
use crate::test_support::{MemoryCredentialStore, MockTransport};

fn pipeline(store: MemoryCredentialStore) -> (RequestPipeline<MockTransport>, MockTransport) {
    let transport = MockTransport::new();
    (RequestPipeline::new(transport.clone(), Rc::new(store), "/api/"), transport)
}

#[test]
fn attaches_bearer_header_when_credential_is_stored() {
    let (pipeline, transport) = pipeline(MemoryCredentialStore::with_token("T"));
    transport.reply(200, serde_json::json!({"user": {"id": 1, "name": "A"}}));

    let body: UserEnvelope = block_on(pipeline.get_json("/users/me")).unwrap();

    assert_eq!(body.user.id, 1);
    let sent = transport.requests();
    assert_eq!(sent[0].header("authorization"), Some("Bearer T"));
    assert_eq!(sent[0].url, "/api/users/me");
}

#[test]
fn sends_unauthenticated_without_credential() {
    let (pipeline, transport) = pipeline(MemoryCredentialStore::default());
    transport.reply(200, serde_json::json!({"users": []}));

    let _: serde_json::Value = block_on(pipeline.get_json("/admin/users")).unwrap();

    assert_eq!(transport.requests()[0].header("Authorization"), None);
}

#[test]
fn unauthorized_notifies_listeners_and_returns_rejected() {
    let (pipeline, transport) = pipeline(MemoryCredentialStore::with_token("T"));
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    pipeline.on_rejection(move |r| sink.borrow_mut().push(r.clone()));
    transport.reply(401, serde_json::json!({"error": "Invalid token"}));

    let err = block_on(pipeline.get_json::<serde_json::Value>("/users/me")).unwrap_err();

    assert_eq!(err, ApiError::Rejected { message: "Invalid token".to_owned() });
    assert_eq!(
        *seen.borrow(),
        vec![Rejection { path: "/users/me".to_owned(), credential_attached: true }]
    );
}

#[test]
fn other_statuses_carry_server_message_without_notifying() {
    let (pipeline, transport) = pipeline(MemoryCredentialStore::default());
    let fired = Rc::new(RefCell::new(false));
    let flag = fired.clone();
    pipeline.on_rejection(move |_| *flag.borrow_mut() = true);
    transport.reply(409, serde_json::json!({"error": "email exists"}));

    let err = block_on(pipeline.send_json::<_, serde_json::Value>(
        Method::Post,
        "/auth/register",
        &serde_json::json!({}),
    ))
    .unwrap_err();

    assert_eq!(err, ApiError::Status { status: 409, message: Some("email exists".to_owned()) });
    assert_eq!(err.server_message(), Some("email exists"));
    assert!(!*fired.borrow());
}

#[test]
fn transport_failures_pass_through() {
    let (pipeline, transport) = pipeline(MemoryCredentialStore::default());
    transport.fail("network unreachable");

    let err = block_on(pipeline.get_json::<serde_json::Value>("/users/me")).unwrap_err();

    assert_eq!(err, ApiError::Transport("network unreachable".to_owned()));
    assert_eq!(err.server_message(), None);
}

#[test]
fn malformed_success_body_is_a_decode_error() {
    let (pipeline, transport) = pipeline(MemoryCredentialStore::default());
    transport.reply(200, serde_json::json!({"unexpected": true}));

    let err = block_on(pipeline.get_json::<UserEnvelope>("/users/me")).unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn multipart_upload_carries_image_payload() {
    let (pipeline, transport) = pipeline(MemoryCredentialStore::with_token("T"));
    transport.reply(200, serde_json::json!({"user": {"id": 1, "name": "A"}}));
    let payload = ImagePayload {
        file_name: "me.png".to_owned(),
        content_type: "image/png".to_owned(),
        bytes: vec![0x89, 0x50],
    };

    let _: UserEnvelope = block_on(pipeline.post_multipart("/users/me/image", payload.clone())).unwrap();

    let sent = &transport.requests()[0];
    assert_eq!(sent.method, Method::Post);
    assert_eq!(sent.body, RequestBody::Multipart(payload));
}
