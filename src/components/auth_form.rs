//! Auth panel: email/password sign-in and sign-up, Google OAuth, and the
//! unconfirmed-email fallback that mails a one-time sign-in link.
//!
//! FALLBACK
//! ========
//! Providers reject password sign-in on accounts whose address was never
//! confirmed, and the raw error is a dead end for the user. When the
//! failure text mentions confirmation and we have an address, the panel
//! fires exactly one one-time-link request and tells the user to check
//! their inbox; if that secondary request fails too, its error wins.

#[cfg(test)]
#[path = "auth_form_test.rs"]
mod auth_form_test;

use leptos::prelude::*;

use crate::components::notice_stack::push_notice;
use crate::net::client::ChatBackend;
use crate::state::notice::{NoticeKind, NoticeState};

/// Display name recorded at sign-up: the provided value, or the email
/// local part when the field was left blank.
#[must_use]
pub fn signup_display_name(provided: &str, email: &str) -> String {
    if provided.is_empty() {
        email.split('@').next().unwrap_or(email).to_owned()
    } else {
        provided.to_owned()
    }
}

/// True when a password sign-in failure should fall back to mailing a
/// one-time sign-in link: the provider is complaining about an unconfirmed
/// address and there is an address to mail.
#[must_use]
pub fn wants_confirmation_fallback(error_message: &str, email: &str) -> bool {
    !email.is_empty() && error_message.to_lowercase().contains("confirm")
}

/// Auth panel. `on_success` fires with no payload after any successful
/// sign-up or sign-in so the parent can swap to the chat view.
#[component]
pub fn AuthForm(on_success: Callback<()>) -> impl IntoView {
    let backend = expect_context::<ChatBackend>();
    let notices = expect_context::<RwSignal<NoticeState>>();

    let is_sign_up = RwSignal::new(false);
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let display_name = RwSignal::new(String::new());
    let loading = RwSignal::new(false);

    let submit_backend = backend.clone();
    let do_submit = move || {
        if loading.get_untracked() {
            return;
        }
        loading.set(true);

        let backend = submit_backend.clone();
        leptos::task::spawn_local(async move {
            let email_value = email.get_untracked();
            let password_value = password.get_untracked();
            let signing_up = is_sign_up.get_untracked();

            let result = if signing_up {
                let name = signup_display_name(&display_name.get_untracked(), &email_value);
                backend
                    .sign_up(&email_value, &password_value, &name, &origin())
                    .await
                    .map(|_| ())
            } else {
                backend
                    .sign_in_with_password(&email_value, &password_value)
                    .await
                    .map(|_| ())
            };

            match result {
                Ok(()) => {
                    if signing_up {
                        push_notice(
                            notices,
                            NoticeKind::Info,
                            "Account created!",
                            "You can now start chatting.",
                        );
                    } else {
                        push_notice(
                            notices,
                            NoticeKind::Info,
                            "Welcome back!",
                            "Successfully signed in.",
                        );
                    }
                    on_success.run(());
                }
                Err(e) => {
                    let message = e.to_string();
                    if wants_confirmation_fallback(&message, &email_value) {
                        match backend.sign_in_with_otp(&email_value).await {
                            Ok(()) => push_notice(
                                notices,
                                NoticeKind::Info,
                                "Email not confirmed",
                                "We sent a sign-in link to your email. Check your inbox to complete sign in.",
                            ),
                            Err(otp_err) => push_notice(
                                notices,
                                NoticeKind::Error,
                                "Error",
                                &otp_err.to_string(),
                            ),
                        }
                    } else {
                        push_notice(notices, NoticeKind::Error, "Error", &message);
                    }
                }
            }
            loading.set(false);
        });
    };

    let oauth_backend = backend.clone();
    let on_google = move |_| {
        if let Err(e) = oauth_backend.sign_in_with_oauth("google", &origin()) {
            push_notice(notices, NoticeKind::Error, "Error", &e.to_string());
        }
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        do_submit();
    };

    view! {
        <div class="auth-card">
            <h2 class="auth-card__title">
                {move || if is_sign_up.get() { "Create Account" } else { "Welcome Back" }}
            </h2>
            <p class="auth-card__subtitle">
                {move || {
                    if is_sign_up.get() { "Join the conversation" } else { "Sign in to continue chatting" }
                }}
            </p>

            <form class="auth-card__form" on:submit=on_submit>
                {move || {
                    is_sign_up.get().then(|| view! {
                        <label class="auth-card__label">
                            "Display Name"
                            <input
                                class="auth-card__input"
                                type="text"
                                placeholder="Your name"
                                prop:value=move || display_name.get()
                                on:input=move |ev| display_name.set(event_target_value(&ev))
                            />
                        </label>
                    })
                }}

                <label class="auth-card__label">
                    "Email"
                    <input
                        class="auth-card__input"
                        type="email"
                        required=true
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                </label>

                <label class="auth-card__label">
                    "Password"
                    <input
                        class="auth-card__input"
                        type="password"
                        required=true
                        minlength="6"
                        placeholder="........"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </label>

                <button
                    class="btn btn--primary auth-card__submit"
                    type="submit"
                    disabled=move || loading.get()
                >
                    {move || {
                        if loading.get() {
                            "Please wait..."
                        } else if is_sign_up.get() {
                            "Create Account"
                        } else {
                            "Sign In"
                        }
                    }}
                </button>
            </form>

            <button class="btn btn--outline auth-card__oauth" on:click=on_google>
                "Continue with Google"
            </button>

            <p class="auth-card__switch">
                {move || {
                    if is_sign_up.get() { "Already have an account? " } else { "No account yet? " }
                }}
                <button
                    class="auth-card__toggle"
                    type="button"
                    on:click=move |_| is_sign_up.update(|v| *v = !*v)
                >
                    {move || if is_sign_up.get() { "Sign in" } else { "Sign up" }}
                </button>
            </p>
        </div>
    }
}

/// The page origin used as the OAuth / confirmation redirect target.
fn origin() -> String {
    web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .unwrap_or_default()
}
