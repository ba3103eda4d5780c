//! Switching the wallet to the target network.
//!
//! # States
//! ```text
//! switch ──ok──────────────────────────────→ Switched
//!    │
//!    ├─4902 (unknown chain)→ add → switch ─ok→ AddedAndSwitched
//!    │                        │       └─err─→ Failed
//!    │                        └─err─────────→ Failed
//!    └─other error─────────────────────────→ Failed
//! ```
//!
//! One attempt per call: no loop, no backoff.

use serde_json::{json, Value};

use crate::network::descriptor::ChainDescriptor;
use crate::observability::metrics;
use crate::wallet::adapter::WalletAdapter;
use crate::wallet::provider::methods;
use crate::wallet::types::ProviderResult;

/// How a switch attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// No wallet; nothing was requested.
    Unavailable,
    /// The first switch request succeeded.
    Switched,
    /// The chain was unknown, was added, and the second switch succeeded.
    AddedAndSwitched,
    /// A request failed; the error was logged.
    Failed,
}

impl SwitchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SwitchOutcome::Switched | SwitchOutcome::AddedAndSwitched)
    }

    fn as_label(&self) -> &'static str {
        match self {
            SwitchOutcome::Unavailable => "unavailable",
            SwitchOutcome::Switched => "switched",
            SwitchOutcome::AddedAndSwitched => "added_and_switched",
            SwitchOutcome::Failed => "failed",
        }
    }
}

/// Moves the wallet onto one configured network.
#[derive(Debug, Clone)]
pub struct NetworkSwitcher {
    adapter: WalletAdapter,
    target: ChainDescriptor,
}

impl NetworkSwitcher {
    pub fn new(adapter: WalletAdapter, target: ChainDescriptor) -> Self {
        Self { adapter, target }
    }

    pub fn target(&self) -> &ChainDescriptor {
        &self.target
    }

    /// Switch to the target network, adding it first if the wallet does not
    /// know it. True on success.
    pub async fn switch_to_target_network(&self) -> bool {
        self.switch().await.is_success()
    }

    /// Same as [`switch_to_target_network`](Self::switch_to_target_network),
    /// reporting which path was taken.
    pub async fn switch(&self) -> SwitchOutcome {
        let outcome = self.run().await;
        metrics::record_network_switch(outcome.as_label());
        outcome
    }

    async fn run(&self) -> SwitchOutcome {
        if !self.adapter.is_wallet_available() {
            return SwitchOutcome::Unavailable;
        }

        let chain_id = self.target.hex_chain_id();
        match self.request_switch().await {
            Ok(_) => {
                tracing::info!(chain_id = %chain_id, "Switched network");
                SwitchOutcome::Switched
            }
            Err(e) if e.is_unrecognized_chain() => {
                tracing::info!(
                    chain_id = %chain_id,
                    chain_name = %self.target.chain_name,
                    "Chain unknown to wallet, adding it"
                );
                match self.add_and_switch().await {
                    Ok(()) => {
                        tracing::info!(chain_id = %chain_id, "Added and switched network");
                        SwitchOutcome::AddedAndSwitched
                    }
                    Err(e) => {
                        tracing::error!(
                            chain_id = %chain_id,
                            error = %e,
                            "Failed to add chain {}",
                            self.target.chain_name
                        );
                        SwitchOutcome::Failed
                    }
                }
            }
            Err(e) => {
                tracing::error!(chain_id = %chain_id, error = %e, "Switch chain error");
                SwitchOutcome::Failed
            }
        }
    }

    async fn request_switch(&self) -> ProviderResult<Value> {
        self.adapter
            .request(
                methods::WALLET_SWITCH_ETHEREUM_CHAIN,
                json!([{ "chainId": self.target.hex_chain_id() }]),
            )
            .await
    }

    async fn add_and_switch(&self) -> ProviderResult<()> {
        self.adapter
            .request(methods::WALLET_ADD_ETHEREUM_CHAIN, json!([&self.target]))
            .await?;
        self.request_switch().await?;
        Ok(())
    }
}
