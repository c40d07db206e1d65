//! HTTP half of the backend handle: auth and table operations.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, BackendError>`; callers surface failures
//! as notices and the UI keeps running. The provider's own error message is
//! preserved wherever it sends one, because the auth panel branches on it
//! (the unconfirmed-email fallback matches on the text).

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use gloo_net::http::{Request, RequestBuilder, Response};
use leptos::prelude::{GetUntracked, RwSignal, Set};
use serde_json::{Value, json};

use super::types::{Message, NewMessage, Session, User};
use crate::config::BackendConfig;

/// Failure surfaced by any backend call.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The service answered with a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("request failed: {0}")]
    Network(String),
    #[error("unexpected response shape: {0}")]
    Decode(String),
}

/// Handle to the managed chat backend.
///
/// Constructed once at the root and passed down via context; components
/// never reach for a global. Clones are cheap and share the signed-in
/// session, which lives in a signal so the handle stays cheap to clone and
/// safe to read from the single-threaded event loop.
#[derive(Clone)]
pub struct ChatBackend {
    config: BackendConfig,
    session: RwSignal<Option<Session>>,
}

impl ChatBackend {
    #[must_use]
    pub fn new(config: BackendConfig) -> Self {
        Self { config, session: RwSignal::new(None) }
    }

    #[must_use]
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// The signed-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.session.get_untracked().map(|s| s.user)
    }

    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.session.get_untracked().map(|s| s.access_token)
    }

    /// Register a new account.
    ///
    /// Returns the session when the provider signs the account straight in,
    /// `None` when it first wants the email address confirmed. Both count
    /// as a successful sign-up.
    ///
    /// # Errors
    ///
    /// Returns the provider's error when registration is rejected.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
        redirect_to: &str,
    ) -> Result<Option<Session>, BackendError> {
        let body = json!({
            "email": email,
            "password": password,
            "data": { "display_name": display_name },
            "email_redirect_to": redirect_to,
        });
        let value = self.post_auth("signup", &body).await?;

        // A session body carries `access_token`; a bare user body means the
        // provider is holding the session until the email confirms.
        if value.get("access_token").is_some() {
            let session: Session = decode(value)?;
            self.session.set(Some(session.clone()));
            Ok(Some(session))
        } else {
            Ok(None)
        }
    }

    /// Password sign-in.
    ///
    /// # Errors
    ///
    /// Returns the provider's error on rejection; the message text matters
    /// to callers (see the unconfirmed-email fallback in the auth panel).
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, BackendError> {
        let body = json!({ "email": email, "password": password });
        let value = self.post_auth("token?grant_type=password", &body).await?;
        let session: Session = decode(value)?;
        self.session.set(Some(session.clone()));
        Ok(session)
    }

    /// Email a one-time sign-in link: the recovery path for accounts whose
    /// address was never confirmed.
    ///
    /// # Errors
    ///
    /// Returns the provider's error when the link cannot be sent.
    pub async fn sign_in_with_otp(&self, email: &str) -> Result<(), BackendError> {
        let body = json!({ "email": email, "create_user": false });
        self.post_auth("otp", &body).await.map(|_| ())
    }

    /// Provider-redirect OAuth. Navigates the whole window; only an
    /// immediate dispatch failure ever returns.
    ///
    /// # Errors
    ///
    /// Returns an error when the authorize URL cannot be built or the
    /// browser rejects the navigation.
    pub fn sign_in_with_oauth(&self, provider: &str, redirect_to: &str) -> Result<(), BackendError> {
        let url = oauth_authorize_url(&self.config, provider, redirect_to)?;
        let window = web_sys::window()
            .ok_or_else(|| BackendError::Network("no window".to_owned()))?;
        window
            .location()
            .set_href(&url)
            .map_err(|_| BackendError::Network("navigation rejected".to_owned()))
    }

    /// End the session. The local session drops regardless of whether the
    /// provider acknowledged; a failed remote call is still reported.
    ///
    /// # Errors
    ///
    /// Returns the provider's error when the remote sign-out failed.
    pub async fn sign_out(&self) -> Result<(), BackendError> {
        let request = self.with_auth(Request::post(&self.config.auth_endpoint("logout")));
        self.session.set(None);

        let response = request.send().await.map_err(network)?;
        if response.ok() {
            Ok(())
        } else {
            Err(api_error(response).await)
        }
    }

    /// Full message history, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error when the fetch fails or rows do not decode.
    pub async fn fetch_messages(&self) -> Result<Vec<Message>, BackendError> {
        let url = format!(
            "{}?select=*&order=created_at.asc",
            self.config.rest_endpoint("messages")
        );
        let response = self
            .with_auth(Request::get(&url))
            .send()
            .await
            .map_err(network)?;
        if !response.ok() {
            return Err(api_error(response).await);
        }
        response
            .json::<Vec<Message>>()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))
    }

    /// Insert one chat row. The service assigns id and timestamp; the row
    /// comes back to us over the realtime channel, so there is no local
    /// echo here.
    ///
    /// # Errors
    ///
    /// Returns an error when the insert is rejected.
    pub async fn send_message(&self, row: &NewMessage) -> Result<(), BackendError> {
        let response = self
            .with_auth(Request::post(&self.config.rest_endpoint("messages")))
            .header("Prefer", "return=minimal")
            .json(row)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        if response.ok() {
            Ok(())
        } else {
            Err(api_error(response).await)
        }
    }

    fn with_auth(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.header("apikey", &self.config.anon_key);
        match self.access_token() {
            Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
            None => builder,
        }
    }

    async fn post_auth(&self, path: &str, body: &Value) -> Result<Value, BackendError> {
        let response = self
            .with_auth(Request::post(&self.config.auth_endpoint(path)))
            .json(body)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        if !response.ok() {
            return Err(api_error(response).await);
        }
        response
            .json::<Value>()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))
    }
}

/// URL of the provider-redirect authorize endpoint.
///
/// # Errors
///
/// Returns a decode error when the configured base URL is not parseable.
pub fn oauth_authorize_url(
    config: &BackendConfig,
    provider: &str,
    redirect_to: &str,
) -> Result<String, BackendError> {
    let mut url = url::Url::parse(&config.auth_endpoint("authorize"))
        .map_err(|e| BackendError::Decode(e.to_string()))?;
    url.query_pairs_mut()
        .append_pair("provider", provider)
        .append_pair("redirect_to", redirect_to);
    Ok(url.into())
}

async fn api_error(response: Response) -> BackendError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    BackendError::Api { status, message: error_message(status, &body) }
}

/// Providers disagree on the error field name; take the first one present.
fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            ["msg", "message", "error_description", "error"]
                .iter()
                .find_map(|key| value.get(key).and_then(Value::as_str).map(ToOwned::to_owned))
        })
        .unwrap_or_else(|| format!("request failed with status {status}"))
}

fn network(err: gloo_net::Error) -> BackendError {
    BackendError::Network(err.to_string())
}

fn decode<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, BackendError> {
    serde_json::from_value(value).map_err(|e| BackendError::Decode(e.to_string()))
}
