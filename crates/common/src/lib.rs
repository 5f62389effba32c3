//! Common utilities shared across the Somfy client crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `foundation`: utilities without side effects (query string decoding)
//! - `platform`: OAuth token values

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Foundation tier
// -----------------------------------------------------------------
#[cfg(feature = "foundation")]
pub mod utils;

// Platform tier
// -------------------------------------------------------------------
#[cfg(feature = "platform")]
pub mod auth;

// Re-export commonly used types for convenience
// ------------------------
#[cfg(feature = "platform")]
pub use auth::{AccessTokenResponse, InvalidTokenLifetime, Token};
#[cfg(feature = "foundation")]
pub use utils::query::{parse_query, QueryParams};
