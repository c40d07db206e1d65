//! Connection settings for the managed chat backend.
//!
//! One base URL fans out into three surfaces: auth under `/auth/v1`, table
//! data under `/rest/v1`, and the realtime websocket under `/realtime/v1`.
//! The publishable (anon) key rides along as the `apikey` header on HTTP
//! calls and as a query parameter on the socket URL.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

const DEFAULT_URL: &str = "http://127.0.0.1:54321";
const DEFAULT_ANON_KEY: &str = "dev-anon-key";

/// Where the backend lives and which publishable key unlocks it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
}

impl BackendConfig {
    #[must_use]
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let mut url = url.into();
        while url.ends_with('/') {
            url.pop();
        }
        Self { url, anon_key: anon_key.into() }
    }

    /// Build from the compile-time environment, falling back to local dev
    /// values. WASM has no process environment, so overrides are baked in
    /// at build time via `GLASSCHAT_BACKEND_URL` / `GLASSCHAT_ANON_KEY`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(
            option_env!("GLASSCHAT_BACKEND_URL").unwrap_or(DEFAULT_URL),
            option_env!("GLASSCHAT_ANON_KEY").unwrap_or(DEFAULT_ANON_KEY),
        )
    }

    #[must_use]
    pub fn auth_endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.url)
    }

    #[must_use]
    pub fn rest_endpoint(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.url)
    }

    /// Realtime websocket URL. The http(s) scheme flips to ws(s); anything
    /// else is passed through untouched.
    #[must_use]
    pub fn realtime_endpoint(&self) -> String {
        let ws_base = if let Some(rest) = self.url.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = self.url.strip_prefix("http://") {
            format!("ws://{rest}")
        } else {
            self.url.clone()
        };
        format!("{ws_base}/realtime/v1/websocket?apikey={}&vsn=1.0.0", self.anon_key)
    }
}
