//! Relative timestamp labels for message rows.

#[cfg(test)]
#[path = "time_test.rs"]
mod time_test;

use chrono::{DateTime, Utc};

/// Human label for how long ago `then` was, relative to `now`.
///
/// Rows stamped in the future (server clock ahead of the browser) read as
/// "just now" rather than something negative.
#[must_use]
pub fn relative_label(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();
    if seconds < 5 {
        return "just now".to_owned();
    }
    if seconds < 60 {
        return format!("{seconds}s ago");
    }
    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours}h ago");
    }
    let days = hours / 24;
    if days < 7 {
        return format!("{days}d ago");
    }
    then.format("%Y-%m-%d").to_string()
}

/// `relative_label` against the current clock.
#[must_use]
pub fn ago(then: DateTime<Utc>) -> String {
    relative_label(then, Utc::now())
}
