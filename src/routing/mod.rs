//! Page routing table.
//!
//! Three pages at fixed paths. Locations are accepted either as plain paths
//! (`/tos`) or as hash-router URLs (`https://host/#/tos`).

pub mod router;

pub use router::{resolve, Page};
