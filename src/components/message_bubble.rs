//! Single message row with own/other alignment.

use leptos::prelude::*;

use crate::net::types::Message;
use crate::util::time;

/// One chat bubble. `is_own` only affects presentation (alignment and
/// accent), never the data.
#[component]
pub fn MessageBubble(message: Message, is_own: bool) -> impl IntoView {
    let author = message.display_label().to_owned();
    let initial = message.avatar_initial().to_string();
    let when = time::ago(message.created_at);
    let avatar = message.avatar_url.clone();
    let text = message.text.clone();

    view! {
        <div class="bubble" class:bubble--own=is_own>
            <div class="bubble__avatar">
                {match avatar {
                    Some(url) => view! { <img class="bubble__avatar-img" src=url alt=""/> }.into_any(),
                    None => view! { <span class="bubble__avatar-fallback">{initial}</span> }.into_any(),
                }}
            </div>
            <div class="bubble__body">
                <div class="bubble__meta">
                    <span class="bubble__author">{author}</span>
                    <span class="bubble__time">{when}</span>
                </div>
                <p class="bubble__text">{text}</p>
            </div>
        </div>
    }
}
