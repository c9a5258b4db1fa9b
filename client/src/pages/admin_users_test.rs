use super::*;

fn user(id: u64, name: &str) -> User {
    User { id, name: name.to_owned(), email: format!("{name}@example.com"), ..User::default() }
}

fn signed_in_as(me: User) -> SessionState {
    SessionState {
        phase: crate::state::session::SessionPhase::Authenticated,
        identity: Some(me),
        loading: false,
        ..SessionState::default()
    }
}

#[test]
fn can_delete_other_users_only() {
    let session = signed_in_as(user(1, "ana"));
    assert!(!can_delete(&user(1, "ana"), &session));
    assert!(can_delete(&user(2, "bruno"), &session));
}

#[test]
fn can_delete_nothing_without_identity() {
    assert!(!can_delete(&user(2, "bruno"), &SessionState::default()));
}

#[test]
fn failure_message_prefers_server_text() {
    let rejected = ApiError::Status { status: 403, message: Some("Forbidden".to_owned()) };
    assert_eq!(failure_message(&rejected, DELETE_FAILED), "Forbidden");
    let transport = ApiError::Transport("offline".to_owned());
    assert_eq!(failure_message(&transport, LIST_FAILED), LIST_FAILED);
}

#[test]
fn without_user_removes_matching_row() {
    let mut users = vec![user(1, "ana"), user(2, "bruno")];
    without_user(&mut users, 2);
    assert_eq!(users, vec![user(1, "ana")]);
}
