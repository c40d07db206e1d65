//! Notice (toast) rendering with auto-dismiss.

use std::time::Duration;

use leptos::prelude::*;

use crate::state::notice::{NoticeKind, NoticeState};

const AUTO_DISMISS_MS: u64 = 4_500;

/// Queue a notice and schedule its removal.
pub fn push_notice(notices: RwSignal<NoticeState>, kind: NoticeKind, title: &str, body: &str) {
    let mut id = None;
    let (title, body) = (title.to_owned(), body.to_owned());
    notices.update(|state| id = Some(state.push(kind, title, body)));

    if let Some(id) = id {
        leptos::task::spawn_local(async move {
            gloo_timers::future::sleep(Duration::from_millis(AUTO_DISMISS_MS)).await;
            notices.update(|state| state.dismiss(id));
        });
    }
}

/// Fixed-position stack of active notices; clicking one dismisses it early.
#[component]
pub fn NoticeStack() -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticeState>>();

    view! {
        <div class="notices">
            {move || {
                notices
                    .get()
                    .notices
                    .iter()
                    .map(|notice| {
                        let id = notice.id;
                        let is_error = notice.kind == NoticeKind::Error;
                        let title = notice.title.clone();
                        let body = notice.body.clone();
                        view! {
                            <div
                                class="notices__item"
                                class:notices__item--error=is_error
                                on:click=move |_| notices.update(|state| state.dismiss(id))
                            >
                                <p class="notices__title">{title}</p>
                                <p class="notices__body">{body}</p>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}
