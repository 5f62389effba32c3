//! Common utility functions
//!
//! - **[`query`]**: query string decoding into an ordered multi-map

pub mod query;

pub use self::query::{parse_query, parse_query_str, QueryParams};
