//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → DAPP_* environment overrides (read once)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//! ```
//!
//! Configuration is read once at startup and never revalidated.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load, ConfigError};
pub use schema::AppConfig;
pub use schema::CurrencyConfig;
pub use schema::DataConfig;
pub use schema::NetworkConfig;
pub use schema::ObservabilityConfig;
pub use schema::ProviderConfig;
