//! Message composer: Enter sends, Shift+Enter breaks the line.

#[cfg(test)]
#[path = "message_input_test.rs"]
mod message_input_test;

use leptos::prelude::*;

/// True when the keystroke should dispatch the pending text.
#[must_use]
pub fn is_submit_key(key: &str, shift_held: bool) -> bool {
    key == "Enter" && !shift_held
}

/// True when `text` may be sent: something non-blank and input enabled.
#[must_use]
pub fn can_submit(text: &str, disabled: bool) -> bool {
    !text.trim().is_empty() && !disabled
}

/// Composer row: a textarea plus a send button.
///
/// Submit passes the raw (untrimmed) text to `on_send` and clears the
/// input immediately; a failed send does not restore it.
#[component]
pub fn MessageInput(
    on_send: Callback<String>,
    #[prop(optional)] disabled: bool,
) -> impl IntoView {
    let input = RwSignal::new(String::new());

    let do_send = move || {
        let text = input.get();
        if !can_submit(&text, disabled) {
            return;
        }
        on_send.run(text);
        input.set(String::new());
    };

    let on_click = move |_| do_send();

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if is_submit_key(&ev.key(), ev.shift_key()) {
            ev.prevent_default();
            do_send();
        }
    };

    view! {
        <form class="composer" on:submit=move |ev: leptos::ev::SubmitEvent| ev.prevent_default()>
            <textarea
                class="composer__input"
                rows="1"
                placeholder="Type your message... (Shift+Enter for a new line)"
                prop:value=move || input.get()
                on:input=move |ev| input.set(event_target_value(&ev))
                on:keydown=on_keydown
                disabled=disabled
            ></textarea>
            <button
                type="button"
                class="btn btn--primary composer__send"
                on:click=on_click
                disabled=move || !can_submit(&input.get(), disabled)
            >
                "Send"
            </button>
        </form>
    }
}
