//! Client configuration
//!
//! Everything needed to talk to Somfy's Open API: the two base URLs and the
//! application credentials registered in the developer portal ("My Apps").

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::{DEFAULT_API_BASE_URL, DEFAULT_AUTH_BASE_URL};
use crate::errors::{Result, SomfyError};

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_auth_base_url() -> String {
    DEFAULT_AUTH_BASE_URL.to_string()
}

/// Immutable client configuration supplied at construction time
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL for the Open API endpoints
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Base URL for the OAuth endpoints (`/auth`, `/token`)
    #[serde(default = "default_auth_base_url")]
    pub auth_base_url: String,

    /// Callback URL configured for the application in the developer portal
    pub callback_url: String,

    /// Consumer key of the application
    pub consumer_key: String,

    /// Consumer secret of the application
    pub consumer_secret: String,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_base_url", &self.api_base_url)
            .field("auth_base_url", &self.auth_base_url)
            .field("callback_url", &self.callback_url)
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"[REDACTED]")
            .finish()
    }
}

impl ClientConfig {
    /// Create a configuration pointing at the public Somfy endpoints
    #[must_use]
    pub fn new(
        callback_url: impl Into<String>,
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
    ) -> Self {
        Self {
            api_base_url: default_api_base_url(),
            auth_base_url: default_auth_base_url(),
            callback_url: callback_url.into(),
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
        }
    }

    /// Override the API base URL
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Override the OAuth base URL
    #[must_use]
    pub fn with_auth_base_url(mut self, url: impl Into<String>) -> Self {
        self.auth_base_url = url.into();
        self
    }

    /// API base URL without a trailing slash
    #[must_use]
    pub fn api_base(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }

    /// OAuth base URL without a trailing slash
    #[must_use]
    pub fn auth_base(&self) -> &str {
        self.auth_base_url.trim_end_matches('/')
    }

    /// Check that credentials are present and both base URLs are absolute
    /// http(s) URLs.
    ///
    /// # Errors
    /// Returns `SomfyError::Config` describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        validate_base_url("api_base_url", &self.api_base_url)?;
        validate_base_url("auth_base_url", &self.auth_base_url)?;

        for (field, value) in [
            ("callback_url", &self.callback_url),
            ("consumer_key", &self.consumer_key),
            ("consumer_secret", &self.consumer_secret),
        ] {
            if value.trim().is_empty() {
                return Err(SomfyError::Config(format!("{field} must not be empty")));
            }
        }

        Ok(())
    }
}

fn validate_base_url(field: &str, value: &str) -> Result<()> {
    let url = Url::parse(value)
        .map_err(|e| SomfyError::Config(format!("{field} is not a valid URL ({value}): {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(SomfyError::Config(format!("{field} must use http or https, got '{other}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ClientConfig {
        ClientConfig::new("https://my.callback.url", "a-consumer-key", "a-consumer-secret")
    }

    #[test]
    fn defaults_point_at_public_endpoints() {
        let config = config();
        assert_eq!(config.api_base_url, "https://api.somfy.com/api/v1");
        assert_eq!(config.auth_base_url, "https://accounts.somfy.com/oauth/oauth/v2");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn debug_output_redacts_secret() {
        let rendered = format!("{:?}", config());
        assert!(rendered.contains("a-consumer-key"));
        assert!(!rendered.contains("a-consumer-secret"));
    }

    #[test]
    fn trailing_slashes_are_ignored() {
        let config = config().with_api_base_url("http://localhost:8080/api/");
        assert_eq!(config.api_base(), "http://localhost:8080/api");
    }

    #[test]
    fn validate_rejects_missing_credentials() {
        let config = ClientConfig::new("https://my.callback.url", "key", "  ");
        let err = config.validate().unwrap_err();
        assert!(matches!(err, SomfyError::Config(msg) if msg.contains("consumer_secret")));
    }

    #[test]
    fn validate_rejects_non_http_base_url() {
        let config = config().with_auth_base_url("ftp://accounts.somfy.com");
        assert!(matches!(config.validate(), Err(SomfyError::Config(_))));

        let config = self::config().with_api_base_url("not a url");
        assert!(matches!(config.validate(), Err(SomfyError::Config(_))));
    }

    #[test]
    fn deserializes_with_default_urls() {
        let json = r#"{
            "callback_url": "https://my.callback.url",
            "consumer_key": "k",
            "consumer_secret": "s"
        }"#;

        let config: ClientConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.auth_base_url, DEFAULT_AUTH_BASE_URL);
    }
}
