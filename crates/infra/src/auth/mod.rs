//! OAuth2 authorization-code flow against the Somfy authorization server

pub mod authenticator;

pub use authenticator::SomfyAuthenticator;
