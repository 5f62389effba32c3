//! # Somfy Core
//!
//! Port interfaces for the Somfy Open API client - no HTTP code.
//!
//! This crate contains:
//! - `Authenticator`: the OAuth2 authorization-code and refresh grants
//! - `SomfyApi`: the authenticated REST operations
//!
//! ## Architecture Principles
//! - Only depends on `somfy-common` and `somfy-domain`
//! - Adapters live in `somfy-infra`
//! - All external dependencies via traits

pub mod api_ports;
pub mod auth_ports;

pub use api_ports::SomfyApi;
pub use auth_ports::Authenticator;
