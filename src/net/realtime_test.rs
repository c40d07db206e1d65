use std::cell::RefCell;

use super::*;
use uuid::Uuid;

fn row_json(id: u128, text: &str) -> Value {
    json!({
        "id": Uuid::from_u128(id),
        "text": text,
        "user_id": Uuid::from_u128(7),
        "display_name": "Ada",
        "avatar_url": null,
        "created_at": "2026-08-07T10:00:00Z"
    })
}

fn change_event(kind: &str, record: Value) -> Envelope {
    Envelope {
        topic: MESSAGES_TOPIC.to_owned(),
        event: "postgres_changes".to_owned(),
        payload: json!({ "data": { "type": kind, "record": record } }),
        reference: None,
    }
}

// =============================================================
// Envelope wire format
// =============================================================

#[test]
fn envelope_serializes_the_ref_field_name() {
    let envelope = Envelope::heartbeat(3);
    let value = serde_json::to_value(&envelope).expect("envelope");
    assert_eq!(value.get("ref").and_then(Value::as_str), Some("3"));
    assert!(value.get("reference").is_none());
}

#[test]
fn envelope_roundtrips() {
    let envelope = Envelope::join(1, Some("jwt"));
    let text = serde_json::to_string(&envelope).expect("serialize");
    let back: Envelope = serde_json::from_str(&text).expect("deserialize");
    assert_eq!(back, envelope);
}

#[test]
fn join_requests_inserts_on_the_messages_table() {
    let payload = join_payload(None);
    let changes = payload["config"]["postgres_changes"]
        .as_array()
        .expect("changes array");
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0]["event"], "INSERT");
    assert_eq!(changes[0]["schema"], "public");
    assert_eq!(changes[0]["table"], "messages");
}

#[test]
fn join_carries_the_access_token_only_when_present() {
    assert_eq!(
        join_payload(Some("jwt")).get("access_token").and_then(Value::as_str),
        Some("jwt")
    );
    assert!(join_payload(None).get("access_token").is_none());
}

// =============================================================
// Insert extraction
// =============================================================

#[test]
fn insert_record_parses_an_insert_event() {
    let payload = json!({ "data": { "type": "INSERT", "record": row_json(1, "hi") } });
    let row = insert_record(&payload).expect("row");
    assert_eq!(row.text, "hi");
    assert_eq!(row.display_name.as_deref(), Some("Ada"));
}

#[test]
fn insert_record_ignores_other_change_kinds() {
    let payload = json!({ "data": { "type": "UPDATE", "record": row_json(1, "hi") } });
    assert!(insert_record(&payload).is_none());
}

#[test]
fn insert_record_rejects_missing_or_malformed_records() {
    assert!(insert_record(&json!({ "data": { "type": "INSERT" } })).is_none());
    assert!(insert_record(&json!({ "data": { "type": "INSERT", "record": { "id": 1 } } })).is_none());
    assert!(insert_record(&json!({})).is_none());
}

// =============================================================
// Dispatch
// =============================================================

#[test]
fn ok_reply_on_the_channel_topic_marks_the_join() {
    let reply = Envelope {
        topic: MESSAGES_TOPIC.to_owned(),
        event: "phx_reply".to_owned(),
        payload: json!({ "status": "ok", "response": {} }),
        reference: Some("1".to_owned()),
    };
    let mut joined = false;
    handle_envelope(&reply, &mut joined, &|_| {});
    assert!(joined);
}

#[test]
fn rejected_reply_leaves_the_join_unset() {
    let reply = Envelope {
        topic: MESSAGES_TOPIC.to_owned(),
        event: "phx_reply".to_owned(),
        payload: json!({ "status": "error" }),
        reference: Some("1".to_owned()),
    };
    let mut joined = false;
    handle_envelope(&reply, &mut joined, &|_| {});
    assert!(!joined);
}

#[test]
fn insert_events_reach_the_callback_in_arrival_order() {
    let seen = RefCell::new(Vec::new());
    let mut joined = true;
    handle_envelope(&change_event("INSERT", row_json(1, "first")), &mut joined, &|m| {
        seen.borrow_mut().push(m.text);
    });
    handle_envelope(&change_event("INSERT", row_json(2, "second")), &mut joined, &|m| {
        seen.borrow_mut().push(m.text);
    });
    assert_eq!(*seen.borrow(), vec!["first".to_owned(), "second".to_owned()]);
}

#[test]
fn non_insert_events_do_not_touch_the_callback() {
    let seen = RefCell::new(Vec::new());
    let mut joined = true;
    handle_envelope(&change_event("DELETE", row_json(1, "gone")), &mut joined, &|m: Message| {
        seen.borrow_mut().push(m.text);
    });
    assert!(seen.borrow().is_empty());
}

// =============================================================
// Reconnect backoff
// =============================================================

#[test]
fn backoff_doubles_to_the_ceiling() {
    let mut ms = INITIAL_BACKOFF_MS;
    let mut observed = vec![ms];
    for _ in 0..5 {
        ms = next_backoff(ms);
        observed.push(ms);
    }
    assert_eq!(observed, vec![1_000, 2_000, 4_000, 8_000, 10_000, 10_000]);
}

// =============================================================
// Handle release
// =============================================================

#[test]
fn unsubscribe_signals_the_task_exactly_once() {
    let (tx, mut rx) = oneshot::channel();
    let subscription = InsertSubscription { shutdown: Some(tx) };
    subscription.unsubscribe();
    assert!(matches!(rx.try_recv(), Ok(Some(()))));
}

#[test]
fn dropping_the_handle_also_releases() {
    let (tx, mut rx) = oneshot::channel();
    let subscription = InsertSubscription { shutdown: Some(tx) };
    drop(subscription);
    assert!(matches!(rx.try_recv(), Ok(Some(()))));
}
