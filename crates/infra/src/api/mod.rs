//! Somfy Open API client
//!
//! Authenticated access to sites, devices and device commands. The client
//! owns the current token and refreshes it transparently through an
//! [`Authenticator`](somfy_core::Authenticator) when it expires.

pub mod client;

pub use client::SomfyClient;
