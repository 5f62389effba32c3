//! Shared helpers for the infra integration tests.

#![allow(dead_code)]

use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Duration, Utc};
use somfy_common::auth::Token;
use somfy_domain::ClientConfig;
use somfy_infra::{HttpClient, SomfyAuthenticator, SomfyClient};
use wiremock::MockServer;

pub const CALLBACK_URL: &str = "https://my.callback.url";
pub const CONSUMER_KEY: &str = "a-consumer-key";
pub const CONSUMER_SECRET: &str = "a-consumer-secret";
pub const SITE_ID: &str = "1234-5678-91011-121314";

/// Read a JSON fixture from `tests/fixtures/`.
pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("fixture {} should be readable: {e}", path.display()))
}

/// Parse a JSON fixture into a value usable with `ResponseTemplate::set_body_json`.
pub fn fixture_json(name: &str) -> serde_json::Value {
    serde_json::from_str(&fixture(name)).expect("fixture should be valid JSON")
}

/// Configuration pointing both base URLs at the mock server.
pub fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::new(CALLBACK_URL, CONSUMER_KEY, CONSUMER_SECRET)
        .with_api_base_url(server.uri())
        .with_auth_base_url(server.uri())
}

pub fn valid_token() -> Token {
    Token::new(Utc::now(), "a-valid-access-token", "a-valid-refresh-token", 3600)
}

/// Token whose access token expired an hour ago.
pub fn expired_token() -> Token {
    Token::new(
        Utc::now() - Duration::hours(2),
        "an-expired-access-token",
        "a-valid-refresh-token",
        3600,
    )
}

pub fn authenticator_for(server: &MockServer) -> SomfyAuthenticator {
    SomfyAuthenticator::new(&config_for(server)).expect("authenticator should be created")
}

/// Client wired to a real authenticator, both talking to the mock server.
pub fn client_for(server: &MockServer, token: Token) -> SomfyClient {
    let config = config_for(server);
    let http = HttpClient::new().expect("http client should be created");
    let authenticator = SomfyAuthenticator::with_http_client(&config, http.clone())
        .expect("authenticator should be created");
    SomfyClient::with_parts(&config, token, Arc::new(authenticator), http)
}

/// Base URL of a local port with nothing listening on it.
pub fn closed_port_uri() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("port should bind");
    let addr = listener.local_addr().expect("listener should have an address");
    drop(listener);
    format!("http://{addr}")
}
