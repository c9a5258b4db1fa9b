use super::*;

#[test]
fn user_deserializes_server_field_names() {
    let user: User = serde_json::from_value(serde_json::json!({
        "id": 7,
        "name": "Ana",
        "email": "ana@example.com",
        "imagePath": "/uploads/users/a.png",
        "createdAt": "2025-03-01T10:00:00Z",
        "updatedAt": "2025-03-02T10:00:00Z"
    }))
    .unwrap();
    assert_eq!(user.id, 7);
    assert_eq!(user.image_path.as_deref(), Some("/uploads/users/a.png"));
    assert_eq!(user.created_at.as_deref(), Some("2025-03-01T10:00:00Z"));
}

#[test]
fn user_tolerates_minimal_objects() {
    let user: User = serde_json::from_value(serde_json::json!({"id": 1, "name": "A"})).unwrap();
    assert_eq!(user, User { id: 1, name: "A".to_owned(), ..User::default() });
}

#[test]
fn empty_image_path_is_treated_as_missing() {
    let user: User = serde_json::from_value(serde_json::json!({"id": 1, "name": "A", "imagePath": ""})).unwrap();
    assert_eq!(user.image_path, None);
}

#[test]
fn profile_update_omits_unset_fields() {
    let update = ProfileUpdate { name: Some("New".to_owned()), password: None };
    assert_eq!(serde_json::to_value(&update).unwrap(), serde_json::json!({"name": "New"}));
}

#[test]
fn error_message_reads_error_field() {
    assert_eq!(error_message(r#"{"error":"email exists"}"#).as_deref(), Some("email exists"));
    assert_eq!(error_message(r#"{"error":"  "}"#), None);
    assert_eq!(error_message("<html>bad gateway</html>"), None);
}

#[test]
fn image_payload_debug_hides_bytes() {
    let payload = ImagePayload {
        file_name: "a.png".to_owned(),
        content_type: "image/png".to_owned(),
        bytes: vec![1, 2, 3],
    };
    let rendered = format!("{payload:?}");
    assert!(rendered.contains("len: 3"));
    assert!(!rendered.contains("[1, 2, 3]"));
}
