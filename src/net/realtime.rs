//! Realtime half of the backend handle: a live channel of row inserts.
//!
//! The socket speaks Phoenix-style envelopes (`topic`/`event`/`payload`/
//! `ref`). We join one channel configured for INSERT notifications on the
//! messages table, heartbeat to keep the socket alive, and hand every
//! delivered row to the caller in arrival order.
//!
//! LIFECYCLE
//! =========
//! `subscribe_message_inserts` spawns a local task owning the socket. The
//! returned handle is the only way to reach that task: consuming it with
//! `unsubscribe()` (or just dropping it) fires a oneshot, the task sends
//! `phx_leave`, and the loop exits. The shutdown sender is taken out of an
//! `Option`, so the release happens exactly once no matter how the handle
//! goes away. A dropped connection reconnects with capped doubling backoff;
//! a shutdown never does.

#[cfg(test)]
#[path = "realtime_test.rs"]
mod realtime_test;

use std::time::Duration;

use futures::channel::oneshot;
use futures::future::Fuse;
use futures::stream::SplitSink;
use futures::{FutureExt, SinkExt, StreamExt};
use gloo_net::websocket::Message as WsMessage;
use gloo_net::websocket::futures::WebSocket;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::types::Message;
use crate::config::BackendConfig;

const MESSAGES_TOPIC: &str = "realtime:public:messages";
const HEARTBEAT_TOPIC: &str = "phoenix";
const HEARTBEAT_INTERVAL_MS: u32 = 25_000;
const INITIAL_BACKOFF_MS: u32 = 1_000;
const MAX_BACKOFF_MS: u32 = 10_000;

/// One Phoenix-style frame on the realtime socket.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub topic: String,
    pub event: String,
    pub payload: Value,
    #[serde(rename = "ref")]
    pub reference: Option<String>,
}

impl Envelope {
    fn join(reference: u64, access_token: Option<&str>) -> Self {
        Self {
            topic: MESSAGES_TOPIC.to_owned(),
            event: "phx_join".to_owned(),
            payload: join_payload(access_token),
            reference: Some(reference.to_string()),
        }
    }

    fn leave(reference: u64) -> Self {
        Self {
            topic: MESSAGES_TOPIC.to_owned(),
            event: "phx_leave".to_owned(),
            payload: json!({}),
            reference: Some(reference.to_string()),
        }
    }

    fn heartbeat(reference: u64) -> Self {
        Self {
            topic: HEARTBEAT_TOPIC.to_owned(),
            event: "heartbeat".to_owned(),
            payload: json!({}),
            reference: Some(reference.to_string()),
        }
    }
}

/// Join payload requesting INSERT notifications for the messages table.
/// The access token rides along so row-level policies see the caller.
fn join_payload(access_token: Option<&str>) -> Value {
    let mut payload = json!({
        "config": {
            "postgres_changes": [
                { "event": "INSERT", "schema": "public", "table": "messages" }
            ]
        }
    });
    if let Some(token) = access_token {
        payload["access_token"] = Value::String(token.to_owned());
    }
    payload
}

/// Pull the inserted row out of a `postgres_changes` event payload.
fn insert_record(payload: &Value) -> Option<Message> {
    let data = payload.get("data")?;
    if !data
        .get("type")
        .and_then(Value::as_str)
        .is_some_and(|kind| kind.eq_ignore_ascii_case("insert"))
    {
        return None;
    }
    serde_json::from_value(data.get("record")?.clone()).ok()
}

/// Next reconnect delay: doubles up to a ceiling.
fn next_backoff(current_ms: u32) -> u32 {
    (current_ms * 2).min(MAX_BACKOFF_MS)
}

/// Live handle to the insert subscription.
pub struct InsertSubscription {
    shutdown: Option<oneshot::Sender<()>>,
}

impl InsertSubscription {
    /// Close the channel and stop the background task.
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for InsertSubscription {
    fn drop(&mut self) {
        self.release();
    }
}

/// Open the live insert channel for the messages table.
///
/// `on_insert` runs on the UI event loop for every row the channel
/// delivers, in arrival order, until the returned handle is released.
pub fn subscribe_message_inserts(
    config: &BackendConfig,
    access_token: Option<String>,
    on_insert: impl Fn(Message) + 'static,
) -> InsertSubscription {
    let (tx, rx) = oneshot::channel();
    let url = config.realtime_endpoint();
    leptos::task::spawn_local(subscription_loop(url, access_token, rx, on_insert));
    InsertSubscription { shutdown: Some(tx) }
}

enum ChannelExit {
    Unsubscribed,
    Dropped { joined: bool },
}

/// Connection loop: run the channel, back off, reconnect, until shutdown.
async fn subscription_loop(
    url: String,
    access_token: Option<String>,
    shutdown: oneshot::Receiver<()>,
    on_insert: impl Fn(Message) + 'static,
) {
    let mut shutdown = shutdown.fuse();
    let mut backoff_ms = INITIAL_BACKOFF_MS;

    loop {
        match run_channel(&url, access_token.as_deref(), &mut shutdown, &on_insert).await {
            ChannelExit::Unsubscribed => return,
            ChannelExit::Dropped { joined } => {
                if joined {
                    backoff_ms = INITIAL_BACKOFF_MS;
                }
            }
        }

        log::warn!("realtime channel dropped; reconnecting in {backoff_ms}ms");
        let mut delay =
            Box::pin(gloo_timers::future::sleep(Duration::from_millis(u64::from(backoff_ms))))
                .fuse();
        futures::select! {
            _ = shutdown => return,
            () = delay => {}
        }
        backoff_ms = next_backoff(backoff_ms);
    }
}

/// One socket lifetime: join, then pump heartbeats and incoming frames
/// until the connection drops or the subscription is released.
async fn run_channel(
    url: &str,
    access_token: Option<&str>,
    mut shutdown: &mut Fuse<oneshot::Receiver<()>>,
    on_insert: &impl Fn(Message),
) -> ChannelExit {
    let socket = match WebSocket::open(url) {
        Ok(socket) => socket,
        Err(e) => {
            log::warn!("realtime connect failed: {e}");
            return ChannelExit::Dropped { joined: false };
        }
    };
    let (mut sink, stream) = socket.split();
    let mut stream = stream.fuse();
    let mut heartbeat =
        gloo_timers::future::IntervalStream::new(HEARTBEAT_INTERVAL_MS).fuse();

    let mut next_ref: u64 = 1;
    let mut joined = false;

    if !send_envelope(&mut sink, &Envelope::join(next_ref, access_token)).await {
        return ChannelExit::Dropped { joined };
    }
    next_ref += 1;

    loop {
        futures::select! {
            _ = shutdown => {
                // Tell the server we are leaving; dropping the socket
                // halves afterwards closes the connection either way.
                let _ = send_envelope(&mut sink, &Envelope::leave(next_ref)).await;
                return ChannelExit::Unsubscribed;
            }
            _ = heartbeat.next() => {
                if !send_envelope(&mut sink, &Envelope::heartbeat(next_ref)).await {
                    return ChannelExit::Dropped { joined };
                }
                next_ref += 1;
            }
            incoming = stream.next() => match incoming {
                Some(Ok(WsMessage::Text(text))) => match serde_json::from_str::<Envelope>(&text) {
                    Ok(envelope) => handle_envelope(&envelope, &mut joined, on_insert),
                    Err(e) => log::debug!("unparseable realtime frame: {e}"),
                },
                Some(Ok(WsMessage::Bytes(_))) => {}
                Some(Err(e)) => {
                    log::warn!("realtime recv error: {e}");
                    return ChannelExit::Dropped { joined };
                }
                None => return ChannelExit::Dropped { joined },
            },
        }
    }
}

fn handle_envelope(envelope: &Envelope, joined: &mut bool, on_insert: &impl Fn(Message)) {
    match envelope.event.as_str() {
        "phx_reply" if envelope.topic == MESSAGES_TOPIC => {
            let ok = envelope.payload.get("status").and_then(Value::as_str) == Some("ok");
            if ok {
                *joined = true;
                log::debug!("joined {MESSAGES_TOPIC}");
            } else {
                log::warn!("channel join rejected: {}", envelope.payload);
            }
        }
        "postgres_changes" => {
            if let Some(row) = insert_record(&envelope.payload) {
                on_insert(row);
            }
        }
        "phx_error" => {
            log::warn!("channel error on {}: {}", envelope.topic, envelope.payload);
        }
        _ => {}
    }
}

async fn send_envelope(sink: &mut SplitSink<WebSocket, WsMessage>, envelope: &Envelope) -> bool {
    let Ok(text) = serde_json::to_string(envelope) else {
        return false;
    };
    sink.send(WsMessage::Text(text)).await.is_ok()
}
