//! Adapter over an injected wallet provider.
//!
//! # Responsibilities
//! - Report whether the expected wallet is present
//! - Look up the active account and chain
//! - Request account access and watch transactions
//! - Register cancellable `accountsChanged` / `chainChanged` listeners
//!
//! # Failure handling
//! Nothing here returns an error for a missing wallet or a rejected call.
//! Each operation degrades to its "unavailable" value (`false`, `None`,
//! `-1`) and logs the rejection.

use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::B256;
use serde_json::{json, Value};
use tokio::sync::broadcast::error::RecvError;

use crate::observability::metrics;
use crate::wallet::provider::{methods, Eip1193Provider};
use crate::wallet::subscription::Subscription;
use crate::wallet::types::{
    ChainId, ProviderError, ProviderEvent, ProviderResult, TransactionReceipt, WalletAddress,
};

/// Default receipt polling interval for [`WalletAdapter::watch_transaction`].
pub const DEFAULT_RECEIPT_POLL_INTERVAL: Duration = Duration::from_millis(4000);

/// Floor for the receipt polling interval; a zero-period ticker panics.
const MIN_RECEIPT_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Wallet operations over an optional injected provider.
#[derive(Debug, Clone)]
pub struct WalletAdapter {
    provider: Option<Arc<dyn Eip1193Provider>>,
    receipt_poll_interval: Duration,
}

impl WalletAdapter {
    /// Wrap the injected provider. `None` means no wallet extension.
    pub fn new(provider: Option<Arc<dyn Eip1193Provider>>) -> Self {
        Self {
            provider,
            receipt_poll_interval: DEFAULT_RECEIPT_POLL_INTERVAL,
        }
    }

    /// An adapter with no provider at all.
    pub fn unavailable() -> Self {
        Self::new(None)
    }

    /// Set the receipt polling interval, clamped to at least 1 ms.
    pub fn with_receipt_poll_interval(mut self, interval: Duration) -> Self {
        self.receipt_poll_interval = interval.max(MIN_RECEIPT_POLL_INTERVAL);
        self
    }

    pub fn receipt_poll_interval(&self) -> Duration {
        self.receipt_poll_interval
    }

    /// True only if a provider is injected and it identifies as MetaMask.
    pub fn is_wallet_available(&self) -> bool {
        self.provider.as_ref().is_some_and(|p| p.is_metamask())
    }

    /// The provider, or `None` if unavailable.
    pub fn provider(&self) -> Option<&Arc<dyn Eip1193Provider>> {
        self.provider.as_ref().filter(|p| p.is_metamask())
    }

    /// Issue a raw request against the provider.
    pub async fn request(&self, method: &str, params: Value) -> ProviderResult<Value> {
        let provider = self.provider().ok_or(ProviderError::Unavailable)?;
        let result = provider.request(method, params).await;
        metrics::record_provider_request(method, result.is_ok());
        if let Err(e) = &result {
            tracing::debug!(method, error = %e, "Provider request failed");
        }
        result
    }

    /// Current chain, or `-1` if there is no wallet or the query fails.
    pub async fn get_chain(&self) -> ChainId {
        match self.query_chain().await {
            Ok(chain) => chain,
            Err(ProviderError::Unavailable) => ChainId::Unavailable,
            Err(e) => {
                tracing::warn!(error = %e, "Chain query failed");
                ChainId::Unavailable
            }
        }
    }

    /// Current chain, surfacing failures instead of degrading.
    pub async fn query_chain(&self) -> ProviderResult<ChainId> {
        let value = self.request(methods::ETH_CHAIN_ID, json!([])).await?;
        match &value {
            Value::String(raw) => ChainId::parse_reported(raw)
                .map_err(|e| ProviderError::InvalidResponse(e.to_string())),
            Value::Number(n) => n
                .as_u64()
                .map(ChainId::Id)
                .ok_or_else(|| ProviderError::InvalidResponse(format!("chain ID {}", n))),
            other => Err(ProviderError::InvalidResponse(format!("chain ID {}", other))),
        }
    }

    /// First exposed account, lower-cased. `None` on absence or any failure.
    pub async fn get_address(&self) -> Option<WalletAddress> {
        let value = match self.request(methods::ETH_ACCOUNTS, json!([])).await {
            Ok(value) => value,
            Err(_) => return None,
        };

        let first = value.as_array()?.first()?.as_str()?;
        match WalletAddress::parse(first) {
            Ok(address) => Some(address),
            Err(e) => {
                tracing::warn!(error = %e, "Provider returned an invalid account");
                None
            }
        }
    }

    /// Ask the user to grant account access. True on approval.
    pub async fn request_connect(&self) -> bool {
        if !self.is_wallet_available() {
            return false;
        }
        match self.request(methods::ETH_REQUEST_ACCOUNTS, json!([])).await {
            Ok(_) => {
                tracing::info!("Wallet connected");
                true
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    user_rejected = e.is_user_rejected(),
                    "Wallet connection failed"
                );
                false
            }
        }
    }

    /// Listen for `accountsChanged`. `None` if no wallet is available.
    pub fn subscribe_accounts_changed<F>(&self, mut callback: F) -> Option<Subscription>
    where
        F: FnMut(Vec<String>) + Send + 'static,
    {
        self.subscribe(move |event| {
            if let ProviderEvent::AccountsChanged(accounts) = event {
                callback(accounts);
            }
        })
    }

    /// Listen for `chainChanged`. `None` if no wallet is available.
    pub fn subscribe_chain_changed<F>(&self, mut callback: F) -> Option<Subscription>
    where
        F: FnMut(Option<String>) + Send + 'static,
    {
        self.subscribe(move |event| {
            if let ProviderEvent::ChainChanged(chain) = event {
                callback(chain);
            }
        })
    }

    fn subscribe<F>(&self, mut on_event: F) -> Option<Subscription>
    where
        F: FnMut(ProviderEvent) + Send + 'static,
    {
        // Take the receiver now so events emitted before the task starts are kept.
        let mut events = self.provider()?.events();

        Some(Subscription::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => on_event(event),
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Provider event listener lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }))
    }

    /// Fire `callback(receipt, success)` once `tx_hash` is mined.
    ///
    /// Success is true iff the receipt status equals 1. `None` if no wallet
    /// is available.
    pub fn watch_transaction<F>(&self, tx_hash: B256, callback: F) -> Option<Subscription>
    where
        F: FnOnce(TransactionReceipt, bool) + Send + 'static,
    {
        let provider = self.provider()?.clone();
        let poll_interval = self.receipt_poll_interval;

        Some(Subscription::spawn(async move {
            let mut ticker = tokio::time::interval(poll_interval);

            loop {
                ticker.tick().await;

                let value = match provider
                    .request(methods::ETH_GET_TRANSACTION_RECEIPT, json!([tx_hash]))
                    .await
                {
                    Ok(Value::Null) => {
                        tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
                        continue;
                    }
                    Ok(value) => value,
                    Err(e) => {
                        tracing::warn!(tx_hash = %tx_hash, error = %e, "Receipt query failed");
                        continue;
                    }
                };

                let receipt: TransactionReceipt = match serde_json::from_value(value) {
                    Ok(receipt) => receipt,
                    Err(e) => {
                        tracing::warn!(tx_hash = %tx_hash, error = %e, "Malformed receipt");
                        continue;
                    }
                };
                if !receipt.is_mined() {
                    continue;
                }

                let success = receipt.succeeded();
                tracing::info!(tx_hash = %tx_hash, success, "Transaction mined");
                callback(receipt, success);
                return;
            }
        }))
    }
}
