//! Top navigation bar: product identity, current user, sign-out.

use leptos::prelude::*;

use crate::components::notice_stack::push_notice;
use crate::net::client::ChatBackend;
use crate::state::auth::AuthState;
use crate::state::notice::{NoticeKind, NoticeState};

#[component]
pub fn Navbar() -> impl IntoView {
    let backend = expect_context::<ChatBackend>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();

    let on_sign_out = move |_| {
        let backend = backend.clone();
        leptos::task::spawn_local(async move {
            if let Err(e) = backend.sign_out().await {
                push_notice(notices, NoticeKind::Error, "Error", &e.to_string());
            }
            auth.update(|state| state.user = None);
        });
    };

    let label = move || {
        auth.get()
            .user
            .map(|user| user.display_label().to_owned())
            .unwrap_or_default()
    };
    let initial = move || {
        auth.get()
            .user
            .map_or_else(|| "U".to_owned(), |user| user.avatar_initial().to_string())
    };
    let avatar = move || {
        auth.get()
            .user
            .and_then(|user| user.avatar_url().map(ToOwned::to_owned))
    };

    view! {
        <nav class="navbar">
            <div class="navbar__brand">
                <span class="navbar__logo" aria-hidden="true"></span>
                <div>
                    <h1 class="navbar__title">"Glasschat"</h1>
                    <p class="navbar__subtitle">"Chat in realtime"</p>
                </div>
            </div>
            <div class="navbar__user">
                {move || match avatar() {
                    Some(url) => view! { <img class="navbar__avatar" src=url alt=""/> }.into_any(),
                    None => view! {
                        <span class="navbar__avatar navbar__avatar--fallback">{initial()}</span>
                    }.into_any(),
                }}
                <div class="navbar__identity">
                    <p class="navbar__name">{label}</p>
                    <p class="navbar__status">"Online"</p>
                </div>
                <button class="btn btn--ghost" on:click=on_sign_out>"Sign out"</button>
            </div>
        </nav>
    }
}
