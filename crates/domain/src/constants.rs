//! Client constants
//!
//! Endpoint defaults and wire-level values shared by the auth and API layers.

// Endpoint defaults
pub const DEFAULT_API_BASE_URL: &str = "https://api.somfy.com/api/v1";
pub const DEFAULT_AUTH_BASE_URL: &str = "https://accounts.somfy.com/oauth/oauth/v2";

// OAuth paths (appended to the auth base URL)
pub const AUTHORIZE_PATH: &str = "/auth";
pub const TOKEN_PATH: &str = "/token";

// Request headers
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

// HTTP transport
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
