//! # Somfy Infrastructure
//!
//! Adapters implementing the `somfy-core` ports over HTTP.
//!
//! This crate contains:
//! - The HTTP transport (`reqwest`)
//! - The OAuth2 authenticator for the Somfy authorization server
//! - The authenticated Open API client
//! - Configuration loading from environment variables and files
//!
//! ## Architecture
//! - Implements traits defined in `somfy-core`
//! - Depends on `somfy-common`, `somfy-domain` and `somfy-core`
//! - Contains all "impure" code (network and file I/O)

pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use api::SomfyClient;
pub use auth::SomfyAuthenticator;
pub use http::{HttpClient, HttpClientBuilder};
