//! Configuration schema definitions.
//!
//! Every section derives Serde traits and carries defaults, so an empty file
//! (or no file at all) yields a usable configuration.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// GraphQL data endpoint settings.
    pub data: DataConfig,

    /// Target network the wallet is asked to switch to.
    pub network: NetworkConfig,

    /// Wallet provider settings used by the CLI.
    pub provider: ProviderConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// GraphQL endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DataConfig {
    /// GraphQL endpoint URL (e.g. a subgraph query URL).
    pub endpoint_url: String,

    /// Optional API token, sent as `Authorization: Bearer <token>`.
    pub api_token: Option<String>,

    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            endpoint_url: "http://localhost:8000/subgraphs/name/app".to_string(),
            api_token: None,
            request_timeout_secs: 30,
        }
    }
}

/// Target network descriptor.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Decimal chain ID (43114 for Avalanche C-Chain).
    pub chain_id: u64,

    /// Display name registered with the wallet.
    pub chain_name: String,

    /// Native currency metadata.
    pub native_currency: CurrencyConfig,

    /// RPC endpoints registered with the wallet.
    pub rpc_urls: Vec<String>,

    /// Block explorer URLs registered with the wallet.
    pub block_explorer_urls: Vec<String>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            chain_id: 43114,
            chain_name: "Avalanche Mainnet C-Chain".to_string(),
            native_currency: CurrencyConfig::default(),
            rpc_urls: vec!["https://api.avax.network/ext/bc/C/rpc".to_string()],
            block_explorer_urls: vec!["https://snowtrace.io".to_string()],
        }
    }
}

/// Native currency of the target network.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CurrencyConfig {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            name: "Avalanche".to_string(),
            symbol: "AVAX".to_string(),
            decimals: 18,
        }
    }
}

/// Wallet provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// JSON-RPC endpoint standing in for the injected wallet.
    /// Empty means no wallet is present.
    pub rpc_url: String,

    /// Whether the endpoint identifies itself as MetaMask.
    pub is_metamask: bool,

    /// Interval for account/chain change polling, in milliseconds.
    pub poll_interval_ms: u64,

    /// Interval for transaction receipt polling, in milliseconds.
    pub receipt_poll_interval_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            rpc_url: String::new(),
            is_metamask: true,
            poll_interval_ms: 1000,
            receipt_poll_interval_ms: 4000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON instead of the human-readable format.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}
