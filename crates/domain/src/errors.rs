//! Error types used throughout the client

use std::fmt;

use thiserror::Error;

/// Query parameters whose values never appear in rendered errors or logs
const SECRET_QUERY_PARAMS: &[&str] = &["client_secret", "refresh_token", "code"];

/// Main error type for the Somfy client
///
/// Both `Display` and `Debug` render token endpoint URIs with credentials
/// redacted.
#[derive(Error)]
pub enum SomfyError {
    /// The redirect URI handed back by the authorization server has no `code`
    /// query parameter.
    #[error("Invalid redirect: {uri} does not contain a 'code' query parameter")]
    InvalidRedirect { uri: String },

    /// The authorization server answered a token issue/refresh request with a
    /// non-200 status, or the request never completed.
    #[error("Could not fetch a token from {}: {reason}", redact_uri(.uri))]
    TokenFetch { uri: String, status: Option<u16>, reason: String },

    /// Both the access token and the means to refresh it are gone. A new
    /// authorization flow has to be completed.
    #[error("Access token expired and no refresh token is available")]
    TokenExpired,

    /// An authenticated API call returned a non-200 status.
    #[error("API request to {uri} was not successful (status {status})")]
    ApiRequest { uri: String, status: u16 },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}

impl fmt::Debug for SomfyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRedirect { uri } => {
                f.debug_struct("InvalidRedirect").field("uri", uri).finish()
            }
            Self::TokenFetch { uri, status, reason } => f
                .debug_struct("TokenFetch")
                .field("uri", &redact_uri(uri))
                .field("status", status)
                .field("reason", reason)
                .finish(),
            Self::TokenExpired => f.write_str("TokenExpired"),
            Self::ApiRequest { uri, status } => {
                f.debug_struct("ApiRequest").field("uri", uri).field("status", status).finish()
            }
            Self::Transport(msg) => f.debug_tuple("Transport").field(msg).finish(),
            Self::Decode(msg) => f.debug_tuple("Decode").field(msg).finish(),
            Self::Config(msg) => f.debug_tuple("Config").field(msg).finish(),
            Self::InvalidCommand(msg) => f.debug_tuple("InvalidCommand").field(msg).finish(),
        }
    }
}

impl SomfyError {
    /// HTTP status attached to the failure, if the server answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::TokenFetch { status, .. } => *status,
            Self::ApiRequest { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The URI that was requested (or inspected) when the failure occurred.
    #[must_use]
    pub fn uri(&self) -> Option<&str> {
        match self {
            Self::InvalidRedirect { uri }
            | Self::TokenFetch { uri, .. }
            | Self::ApiRequest { uri, .. } => Some(uri),
            _ => None,
        }
    }

    /// Whether the caller has to run the authorization flow again before any
    /// further API call can succeed.
    #[must_use]
    pub fn requires_reauthorization(&self) -> bool {
        match self {
            Self::TokenExpired => true,
            Self::TokenFetch { status: Some(status), .. } => matches!(status, 400 | 401),
            _ => false,
        }
    }
}

/// Result type alias for Somfy client operations
pub type Result<T> = std::result::Result<T, SomfyError>;

/// Replace the values of credential-bearing query parameters with
/// `[REDACTED]`.
///
/// Used when rendering token endpoint URIs, which carry the consumer secret,
/// the refresh token or the authorization code in their query string.
#[must_use]
pub fn redact_uri(uri: &str) -> String {
    let Some((base, query)) = uri.split_once('?') else {
        return uri.to_string();
    };

    let redacted = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, _)) if SECRET_QUERY_PARAMS.contains(&key) => format!("{key}=[REDACTED]"),
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join("&");

    format!("{base}?{redacted}")
}
