//! Chat shell: navbar, live message list, and composer.
//!
//! LIFECYCLE
//! =========
//! Mounting fires the history fetch and opens the insert subscription side
//! by side; rows the channel delivers mid-fetch are kept and land behind
//! the snapshot (see `ChatState::apply_snapshot`). Unmounting consumes the
//! subscription handle in `on_cleanup`, which closes the channel exactly
//! once; a leaked channel would keep appending to a detached list.

use leptos::prelude::*;

use crate::components::message_bubble::MessageBubble;
use crate::components::message_input::MessageInput;
use crate::components::navbar::Navbar;
use crate::components::notice_stack::push_notice;
use crate::net::client::ChatBackend;
use crate::net::realtime::subscribe_message_inserts;
use crate::net::types::NewMessage;
use crate::state::auth::AuthState;
use crate::state::chat::ChatState;
use crate::state::notice::{NoticeKind, NoticeState};

#[component]
pub fn ChatShell() -> impl IntoView {
    let backend = expect_context::<ChatBackend>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();

    let chat = RwSignal::new(ChatState::default());
    let list_ref = NodeRef::<leptos::html::Div>::new();

    // History snapshot.
    let fetch_backend = backend.clone();
    leptos::task::spawn_local(async move {
        match fetch_backend.fetch_messages().await {
            Ok(rows) => chat.update(|state| state.apply_snapshot(rows)),
            Err(e) => {
                push_notice(notices, NoticeKind::Error, "Error", &e.to_string());
                chat.update(ChatState::fetch_failed);
            }
        }
    });

    // Live inserts. The handle is consumed on unmount; its drop guard makes
    // the release single-shot even if cleanup never runs.
    let subscription = subscribe_message_inserts(
        backend.config(),
        backend.access_token(),
        move |row| chat.update(|state| state.apply_insert(row)),
    );
    on_cleanup(move || subscription.unsubscribe());

    // Pin the scroll position to the newest row as the list grows.
    Effect::new(move || {
        let _ = chat.get().messages.len();
        if let Some(el) = list_ref.get() {
            let height = el.scroll_height();
            el.set_scroll_top(height);
        }
    });

    let send_backend = backend.clone();
    let on_send = Callback::new(move |text: String| {
        let Some(user) = auth.get_untracked().user else {
            return;
        };
        let backend = send_backend.clone();
        leptos::task::spawn_local(async move {
            let row = NewMessage::from_user(text, &user);
            if let Err(e) = backend.send_message(&row).await {
                push_notice(notices, NoticeKind::Error, "Error", &e.to_string());
            }
        });
    });

    view! {
        <div class="chat-shell">
            <Navbar/>

            <div class="chat-shell__scroll" node_ref=list_ref>
                <div class="chat-shell__list">
                    {move || {
                        let state = chat.get();
                        if state.is_loading() {
                            return view! {
                                <div class="chat-shell__loading">"Loading messages..."</div>
                            }
                            .into_any();
                        }
                        if state.is_settled_empty() {
                            return view! {
                                <div class="chat-shell__empty">
                                    <h3>"No messages yet"</h3>
                                    <p>"Be the first to start the conversation!"</p>
                                </div>
                            }
                            .into_any();
                        }

                        let viewer = auth.get().user;
                        state
                            .messages
                            .iter()
                            .map(|message| {
                                let is_own = message.is_own(viewer.as_ref());
                                view! { <MessageBubble message=message.clone() is_own=is_own/> }
                            })
                            .collect::<Vec<_>>()
                            .into_any()
                    }}
                </div>
            </div>

            <MessageInput on_send=on_send/>
        </div>
    }
}
