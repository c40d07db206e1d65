//! Root application component wiring contexts and the auth ↔ chat switch.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};

use crate::components::auth_form::AuthForm;
use crate::components::chat_shell::ChatShell;
use crate::components::notice_stack::NoticeStack;
use crate::config::BackendConfig;
use crate::net::client::ChatBackend;
use crate::state::auth::AuthState;
use crate::state::notice::NoticeState;

/// Root component.
///
/// Builds the backend handle from config and provides it (plus the state
/// signals) via context; children never reach for globals. The view swaps
/// between the auth panel and the chat shell on the authenticated-user
/// value alone.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let backend = ChatBackend::new(BackendConfig::from_env());
    let auth = RwSignal::new(AuthState::default());
    let notices = RwSignal::new(NoticeState::default());

    provide_context(backend.clone());
    provide_context(auth);
    provide_context(notices);

    let on_auth_success = Callback::new(move |()| {
        auth.set(AuthState { user: backend.current_user(), loading: false });
    });

    view! {
        <Title text="Glasschat"/>
        <NoticeStack/>
        {move || match auth.get().user {
            Some(_) => view! { <ChatShell/> }.into_any(),
            None => view! {
                <main class="auth-page">
                    <AuthForm on_success=on_auth_success/>
                </main>
            }
            .into_any(),
        }}
    }
}
