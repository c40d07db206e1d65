use super::*;

// =============================================================
// Construction
// =============================================================

#[test]
fn new_trims_trailing_slashes() {
    let config = BackendConfig::new("https://chat.example.com//", "key");
    assert_eq!(config.url, "https://chat.example.com");
}

#[test]
fn from_env_has_usable_defaults() {
    let config = BackendConfig::from_env();
    assert!(!config.url.is_empty());
    assert!(!config.anon_key.is_empty());
}

// =============================================================
// Endpoint derivation
// =============================================================

#[test]
fn auth_endpoint_joins_path() {
    let config = BackendConfig::new("https://chat.example.com", "key");
    assert_eq!(
        config.auth_endpoint("token?grant_type=password"),
        "https://chat.example.com/auth/v1/token?grant_type=password"
    );
}

#[test]
fn rest_endpoint_joins_table() {
    let config = BackendConfig::new("https://chat.example.com", "key");
    assert_eq!(config.rest_endpoint("messages"), "https://chat.example.com/rest/v1/messages");
}

#[test]
fn realtime_endpoint_rewrites_http_to_ws() {
    let config = BackendConfig::new("http://127.0.0.1:54321", "key");
    assert_eq!(
        config.realtime_endpoint(),
        "ws://127.0.0.1:54321/realtime/v1/websocket?apikey=key&vsn=1.0.0"
    );
}

#[test]
fn realtime_endpoint_rewrites_https_to_wss() {
    let config = BackendConfig::new("https://chat.example.com", "anon");
    assert!(config.realtime_endpoint().starts_with("wss://chat.example.com/"));
}

#[test]
fn realtime_endpoint_carries_key_and_protocol_version() {
    let config = BackendConfig::new("https://chat.example.com", "anon");
    let url = config.realtime_endpoint();
    assert!(url.contains("apikey=anon"));
    assert!(url.contains("vsn=1.0.0"));
}
