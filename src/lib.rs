//! Wallet connectivity and GraphQL data access for a dapp front end.

pub mod config;
pub mod connectivity;
pub mod data;
pub mod format;
pub mod network;
pub mod observability;
pub mod routing;
pub mod wallet;

pub use config::AppConfig;
pub use connectivity::{ConnectivityState, ConnectivityTracker};
pub use data::{create_data_client, DataClient, SharedDataClient};
pub use network::{ChainDescriptor, NetworkSwitcher};
pub use wallet::{Eip1193Provider, WalletAdapter};
