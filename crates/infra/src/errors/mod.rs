//! Conversions from transport errors into the client error taxonomy

pub mod conversions;

pub use conversions::{token_fetch_failure, InfraError};
