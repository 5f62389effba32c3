//! # Somfy Domain
//!
//! Data contracts and shared definitions for the Somfy Open API client.
//!
//! This crate contains:
//! - Wire types (Site, Device, Capability, Command, etc.)
//! - The client error taxonomy and `Result` alias
//! - Client configuration
//! - Endpoint constants
//!
//! ## Architecture
//! - No dependencies on other workspace crates
//! - Only external dependencies allowed
//! - Pure data structures, no I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
