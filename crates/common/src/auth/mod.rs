//! OAuth token values
//!
//! The token lifecycle (issue, refresh, replace) is driven by the
//! authenticator and API client in `somfy-infra`; this module only holds the
//! immutable values they exchange.

pub mod types;

pub use types::{AccessTokenResponse, InvalidTokenLifetime, Token};
