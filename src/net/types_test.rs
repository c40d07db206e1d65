use super::*;
use serde_json::json;

fn user(display_name: Option<&str>, email: Option<&str>) -> User {
    User {
        id: Uuid::from_u128(1),
        email: email.map(ToOwned::to_owned),
        user_metadata: UserMetadata {
            display_name: display_name.map(ToOwned::to_owned),
            avatar_url: None,
        },
    }
}

fn message(user_id: Uuid) -> Message {
    Message {
        id: Uuid::from_u128(99),
        text: "hello".to_owned(),
        user_id,
        display_name: None,
        avatar_url: None,
        created_at: "2026-08-07T10:00:00Z".parse().expect("timestamp"),
    }
}

// =============================================================
// Deserialization shapes
// =============================================================

#[test]
fn message_deserializes_from_a_table_row() {
    let row = json!({
        "id": "6e5a4db0-0000-0000-0000-000000000001",
        "text": "hi there",
        "user_id": "6e5a4db0-0000-0000-0000-000000000002",
        "display_name": null,
        "avatar_url": null,
        "created_at": "2026-08-07T10:15:30.123456+00:00"
    });

    let msg: Message = serde_json::from_value(row).expect("message row");
    assert_eq!(msg.text, "hi there");
    assert!(msg.display_name.is_none());
}

#[test]
fn user_tolerates_missing_metadata_and_email() {
    let value = json!({ "id": "6e5a4db0-0000-0000-0000-000000000003" });
    let user: User = serde_json::from_value(value).expect("user");
    assert!(user.email.is_none());
    assert!(user.user_metadata.display_name.is_none());
}

#[test]
fn session_deserializes_token_and_user() {
    let value = json!({
        "access_token": "jwt",
        "token_type": "bearer",
        "expires_in": 3600,
        "user": { "id": "6e5a4db0-0000-0000-0000-000000000004", "email": "a@b.com" }
    });
    let session: Session = serde_json::from_value(value).expect("session");
    assert_eq!(session.access_token, "jwt");
    assert_eq!(session.user.email.as_deref(), Some("a@b.com"));
}

#[test]
fn new_message_serialization_omits_empty_optionals() {
    let payload = NewMessage {
        text: "hi".to_owned(),
        user_id: Uuid::from_u128(7),
        display_name: None,
        avatar_url: None,
    };
    let value = serde_json::to_value(&payload).expect("payload");
    assert!(value.get("display_name").is_none());
    assert!(value.get("avatar_url").is_none());
}

// =============================================================
// Display helpers
// =============================================================

#[test]
fn user_label_prefers_metadata_then_email() {
    assert_eq!(user(Some("Ada"), Some("a@b.com")).display_label(), "Ada");
    assert_eq!(user(None, Some("a@b.com")).display_label(), "a@b.com");
    assert_eq!(user(Some("   "), Some("a@b.com")).display_label(), "a@b.com");
    assert_eq!(user(None, None).display_label(), "Anonymous");
}

#[test]
fn message_label_falls_back_to_anonymous() {
    let mut msg = message(Uuid::from_u128(2));
    assert_eq!(msg.display_label(), "Anonymous");
    msg.display_name = Some("Grace".to_owned());
    assert_eq!(msg.display_label(), "Grace");
}

#[test]
fn avatar_initial_uppercases_the_first_letter() {
    assert_eq!(user(Some("ada"), None).avatar_initial(), 'A');
    let mut msg = message(Uuid::from_u128(2));
    msg.display_name = Some("grace".to_owned());
    assert_eq!(msg.avatar_initial(), 'G');
}

// =============================================================
// Ownership
// =============================================================

#[test]
fn message_is_own_when_author_matches_viewer() {
    let viewer = user(None, Some("a@b.com"));
    let msg = message(viewer.id);
    assert!(msg.is_own(Some(&viewer)));
}

#[test]
fn message_is_not_own_for_another_author_or_signed_out_viewer() {
    let viewer = user(None, Some("a@b.com"));
    let msg = message(Uuid::from_u128(42));
    assert!(!msg.is_own(Some(&viewer)));
    assert!(!msg.is_own(None));
}

// =============================================================
// Insert payload construction
// =============================================================

#[test]
fn new_message_carries_author_identity() {
    let author = user(Some("Ada"), Some("a@b.com"));
    let payload = NewMessage::from_user("hello", &author);
    assert_eq!(payload.user_id, author.id);
    assert_eq!(payload.display_name.as_deref(), Some("Ada"));
}

#[test]
fn new_message_display_name_falls_back_to_email() {
    let author = user(None, Some("a@b.com"));
    let payload = NewMessage::from_user("hello", &author);
    assert_eq!(payload.display_name.as_deref(), Some("a@b.com"));
}
