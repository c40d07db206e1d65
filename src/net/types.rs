//! Wire structures shared by the HTTP and realtime halves of the client.
//!
//! Everything crossing the network boundary is a tagged struct; untyped
//! `serde_json::Value` payloads stop at the realtime envelope layer.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Profile fields the auth provider stores alongside an account.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// The authenticated identity as the auth provider reports it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

impl User {
    /// Name shown in the navbar and bubbles: the metadata display name when
    /// set, otherwise the account email.
    #[must_use]
    pub fn display_label(&self) -> &str {
        self.user_metadata
            .display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .or(self.email.as_deref())
            .unwrap_or("Anonymous")
    }

    #[must_use]
    pub fn avatar_url(&self) -> Option<&str> {
        self.user_metadata.avatar_url.as_deref()
    }

    /// Single-letter fallback when no avatar image is set.
    #[must_use]
    pub fn avatar_initial(&self) -> char {
        initial_letter(self.display_label())
    }
}

/// Access credentials issued by the auth provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: User,
}

/// A chat row as the backend stores it. The service assigns `id` and
/// `created_at`; rows are immutable once created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub text: String,
    pub user_id: Uuid,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Whether the row was authored by `viewer`. Presentation only: it
    /// decides bubble alignment, never data handling.
    #[must_use]
    pub fn is_own(&self, viewer: Option<&User>) -> bool {
        viewer.is_some_and(|user| user.id == self.user_id)
    }

    #[must_use]
    pub fn display_label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or("Anonymous")
    }

    #[must_use]
    pub fn avatar_initial(&self) -> char {
        initial_letter(self.display_label())
    }
}

/// Insert payload for a new chat row.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewMessage {
    pub text: String,
    pub user_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl NewMessage {
    /// Payload for `text` as authored by `user`. The display name falls
    /// back to the account email so rows stay attributable.
    #[must_use]
    pub fn from_user(text: impl Into<String>, user: &User) -> Self {
        Self {
            text: text.into(),
            user_id: user.id,
            display_name: user
                .user_metadata
                .display_name
                .clone()
                .or_else(|| user.email.clone()),
            avatar_url: user.user_metadata.avatar_url.clone(),
        }
    }
}

fn initial_letter(label: &str) -> char {
    label
        .trim()
        .chars()
        .next()
        .map_or('U', |c| c.to_ascii_uppercase())
}
