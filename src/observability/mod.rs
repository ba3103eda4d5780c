//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! wallet / network / data subsystems
//!     → tracing events (structured fields)  → logging.rs subscriber
//!     → metrics counters                    → whichever recorder is installed
//! ```
//!
//! Without an installed metrics recorder the counters are no-ops.

pub mod logging;
pub mod metrics;
