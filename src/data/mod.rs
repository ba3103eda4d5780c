//! GraphQL data access.
//!
//! # Data Flow
//! ```text
//! DataConfig (endpoint URL, optional API token)
//!     → client.rs (create_data_client / SharedDataClient)
//!     → cache.rs (query responses, cache-first by default)
//!     → POST {query, variables, operationName} → endpoint
//! ```
//!
//! No invalidation beyond [`DataClient::clear_cache`].

pub mod cache;
pub mod client;
pub mod types;

pub use client::{create_data_client, DataClient, SharedDataClient};
pub use types::{DataError, DataResult, FetchPolicy, GraphQlError, GraphQlRequest};
