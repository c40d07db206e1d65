#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use crate::net::types::Message;

/// State for the message list.
///
/// The list is append-only for the lifetime of the chat view. Two sources
/// feed it: the one-shot history fetch and the live insert channel, which
/// run side by side. `apply_snapshot` pins down how they interleave.
#[derive(Clone, Debug, Default)]
pub struct ChatState {
    pub messages: Vec<Message>,
    pub phase: LoadPhase,
}

/// Progress of the initial history fetch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadPhase {
    #[default]
    Loading,
    Ready,
}

impl ChatState {
    /// Append a row delivered by the live channel.
    ///
    /// Appends regardless of phase: rows arriving while the history fetch
    /// is still in flight are kept and end up behind the snapshot once it
    /// lands. Rows are never deduplicated by id, so a row present in both
    /// the snapshot and a near-simultaneous event shows twice.
    pub fn apply_insert(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Install the history snapshot (oldest first).
    ///
    /// The resulting list is the snapshot followed by every live row that
    /// arrived while the fetch was in flight, each part keeping its own
    /// order.
    pub fn apply_snapshot(&mut self, snapshot: Vec<Message>) {
        let live = std::mem::take(&mut self.messages);
        self.messages = snapshot;
        self.messages.extend(live);
        self.phase = LoadPhase::Ready;
    }

    /// The fetch failed: keep whatever the channel delivered, stop showing
    /// the loader.
    pub fn fetch_failed(&mut self) {
        self.phase = LoadPhase::Ready;
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    /// True once the fetch settled with nothing to show.
    #[must_use]
    pub fn is_settled_empty(&self) -> bool {
        self.phase == LoadPhase::Ready && self.messages.is_empty()
    }
}
