use std::rc::Rc;

use futures::executor::block_on;

use super::*;
use crate::net::http::RequestBody;
use crate::test_support::{MemoryCredentialStore, MockTransport};

fn pipeline() -> (RequestPipeline<MockTransport>, MockTransport) {
    let transport = MockTransport::new();
    (
        RequestPipeline::new(transport.clone(), Rc::new(MemoryCredentialStore::default()), "/api"),
        transport,
    )
}

#[test]
fn admin_user_endpoint_formats_expected_path() {
    assert_eq!(admin_user_endpoint(42), "/admin/users/42");
}

#[test]
fn login_posts_credentials_and_returns_token() {
    let (pipeline, transport) = pipeline();
    transport.reply(200, serde_json::json!({"token": "T", "user": {"id": 1, "name": "A"}}));
    let request = LoginRequest { email: "a@b.com".to_owned(), password: "pw".to_owned() };

    assert_eq!(block_on(login(&pipeline, &request)), Ok("T".to_owned()));

    let sent = &transport.requests()[0];
    assert_eq!(sent.path, LOGIN_PATH);
    assert_eq!(
        sent.body,
        RequestBody::Json(serde_json::json!({"email": "a@b.com", "password": "pw"}))
    );
}

#[test]
fn login_without_token_is_decode_error() {
    let (pipeline, transport) = pipeline();
    transport.reply(200, serde_json::json!({"token": ""}));
    let request = LoginRequest { email: "a@b.com".to_owned(), password: "pw".to_owned() };

    let err = block_on(login(&pipeline, &request)).unwrap_err();

    assert_eq!(err, ApiError::Decode("token not found in response".to_owned()));
}

#[test]
fn register_accepts_created_status() {
    let (pipeline, transport) = pipeline();
    transport.reply(201, serde_json::json!({"token": "R"}));
    let request = RegisterRequest {
        name: "A".to_owned(),
        email: "a@b.com".to_owned(),
        password: "secret1".to_owned(),
    };

    assert_eq!(block_on(register(&pipeline, &request)), Ok("R".to_owned()));
    assert_eq!(transport.paths(), vec![REGISTER_PATH.to_owned()]);
}

#[test]
fn list_users_defaults_to_empty_when_field_missing() {
    let (pipeline, transport) = pipeline();
    transport.reply(200, serde_json::json!({}));

    assert_eq!(block_on(list_users(&pipeline)), Ok(Vec::new()));
}

#[test]
fn delete_user_returns_server_message() {
    let (pipeline, transport) = pipeline();
    transport.reply(200, serde_json::json!({"message": "User deleted successfully"}));

    assert_eq!(block_on(delete_user(&pipeline, 3)), Ok("User deleted successfully".to_owned()));
    assert_eq!(transport.requests()[0].method, Method::Delete);
    assert_eq!(transport.paths(), vec!["/admin/users/3".to_owned()]);
}
