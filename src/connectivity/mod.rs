//! Connectivity state tracking.
//!
//! # Data Flow
//! ```text
//! activate(adapter)
//!     → accountsChanged listener ─┐
//!     → chainChanged listener ────┼→ watch::Sender<ConnectivityState> → consumers
//!     → initial load (address, chain) ┘
//! ```
//!
//! Single writer at a time; last write wins.

pub mod state;
pub mod tracker;

pub use state::ConnectivityState;
pub use tracker::{Activation, ConnectivityTracker};
