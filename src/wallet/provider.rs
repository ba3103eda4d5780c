//! The injected wallet provider interface (EIP-1193).

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::broadcast;

use crate::wallet::types::{ProviderEvent, ProviderResult};

/// JSON-RPC methods issued against the provider.
pub mod methods {
    pub const ETH_REQUEST_ACCOUNTS: &str = "eth_requestAccounts";
    pub const ETH_ACCOUNTS: &str = "eth_accounts";
    pub const ETH_CHAIN_ID: &str = "eth_chainId";
    pub const ETH_GET_TRANSACTION_RECEIPT: &str = "eth_getTransactionReceipt";
    pub const WALLET_SWITCH_ETHEREUM_CHAIN: &str = "wallet_switchEthereumChain";
    pub const WALLET_ADD_ETHEREUM_CHAIN: &str = "wallet_addEthereumChain";
}

/// A wallet provider as injected by a browser extension.
///
/// Implementations are handed to [`WalletAdapter`](crate::wallet::WalletAdapter)
/// explicitly; nothing reads a global.
#[async_trait]
pub trait Eip1193Provider: Send + Sync + std::fmt::Debug {
    /// Whether the provider identifies itself as MetaMask.
    fn is_metamask(&self) -> bool;

    /// Issue a request. Errors carry the provider's error code when it has one.
    async fn request(&self, method: &str, params: Value) -> ProviderResult<Value>;

    /// A fresh receiver for `accountsChanged` / `chainChanged` events.
    /// Events sent before this call are not observed.
    fn events(&self) -> broadcast::Receiver<ProviderEvent>;
}
