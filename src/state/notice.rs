#[cfg(test)]
#[path = "notice_test.rs"]
mod notice_test;

use uuid::Uuid;

/// Transient user-facing notices. Every error branch in the client lands
/// here instead of being fatal; the stack component renders and expires
/// them.
#[derive(Clone, Debug, Default)]
pub struct NoticeState {
    pub notices: Vec<Notice>,
}

/// A single notice card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub id: Uuid,
    pub kind: NoticeKind,
    pub title: String,
    pub body: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

impl NoticeState {
    /// Queue a notice; the returned id lets a timer dismiss it later.
    pub fn push(
        &mut self,
        kind: NoticeKind,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.notices.push(Notice { id, kind, title: title.into(), body: body.into() });
        id
    }

    /// Remove the notice with `id`, if it is still showing.
    pub fn dismiss(&mut self, id: Uuid) {
        self.notices.retain(|notice| notice.id != id);
    }
}
