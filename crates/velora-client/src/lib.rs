//! HTTP/JSON client for the marketplace REST API.
//!
//! One round trip per call: no retries, no caching. Callers own re-fetching
//! after mutations.

pub mod client;
pub mod config;
pub mod error;

pub use client::RestClient;
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult};
