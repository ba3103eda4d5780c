//! Wallet provider backed by a JSON-RPC endpoint.
//!
//! Lets the CLI drive the adapter against a node or a wallet RPC endpoint
//! instead of a browser extension. HTTP has no push channel, so
//! `accountsChanged` / `chainChanged` are produced by polling `eth_accounts`
//! and `eth_chainId` and emitting on change.

use std::borrow::Cow;
use std::time::Duration;

use alloy::network::Ethereum;
use alloy::providers::{Provider, RootProvider};
use alloy::transports::TransportError;
use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::config::ProviderConfig;
use crate::wallet::provider::{methods, Eip1193Provider};
use crate::wallet::types::{ProviderError, ProviderEvent, ProviderResult};

const EVENT_CAPACITY: usize = 64;

pub struct RpcWalletProvider {
    client: RootProvider<Ethereum>,
    rpc_url: String,
    is_metamask: bool,
    events_tx: broadcast::Sender<ProviderEvent>,
    poller: JoinHandle<()>,
}

impl RpcWalletProvider {
    /// Connect to the configured endpoint and start change polling.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn connect(config: &ProviderConfig) -> ProviderResult<Self> {
        let url: url::Url = config.rpc_url.parse().map_err(|e| {
            ProviderError::Transport(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;
        let client = RootProvider::<Ethereum>::new_http(url);
        let (events_tx, _) = broadcast::channel(EVENT_CAPACITY);

        let poller = tokio::spawn(poll_changes(
            client.clone(),
            events_tx.clone(),
            Duration::from_millis(config.poll_interval_ms),
        ));

        tracing::info!(rpc_url = %config.rpc_url, "RPC wallet provider initialized");

        Ok(Self {
            client,
            rpc_url: config.rpc_url.clone(),
            is_metamask: config.is_metamask,
            events_tx,
            poller,
        })
    }
}

impl Drop for RpcWalletProvider {
    fn drop(&mut self) {
        self.poller.abort();
    }
}

impl std::fmt::Debug for RpcWalletProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcWalletProvider")
            .field("rpc_url", &self.rpc_url)
            .field("is_metamask", &self.is_metamask)
            .finish()
    }
}

#[async_trait]
impl Eip1193Provider for RpcWalletProvider {
    fn is_metamask(&self) -> bool {
        self.is_metamask
    }

    async fn request(&self, method: &str, params: Value) -> ProviderResult<Value> {
        raw_request(&self.client, method, params).await
    }

    fn events(&self) -> broadcast::Receiver<ProviderEvent> {
        self.events_tx.subscribe()
    }
}

async fn raw_request(
    client: &RootProvider<Ethereum>,
    method: &str,
    params: Value,
) -> ProviderResult<Value> {
    let result: Result<Value, TransportError> =
        client.raw_request(Cow::Owned(method.to_string()), params).await;
    result.map_err(map_transport_error)
}

/// Keep the provider's error code when the endpoint sent one.
fn map_transport_error(err: TransportError) -> ProviderError {
    match err.as_error_resp() {
        Some(payload) => ProviderError::Rpc {
            code: payload.code,
            message: payload.message.to_string(),
        },
        None => ProviderError::Transport(err.to_string()),
    }
}

/// Last observed account list and chain.
#[derive(Debug, Default, PartialEq)]
struct Observed {
    accounts: Option<Vec<String>>,
    chain: Option<String>,
}

impl Observed {
    /// Record a new observation, returning the events it implies.
    /// The first observation of each field only seeds the baseline.
    fn update(
        &mut self,
        accounts: Option<Vec<String>>,
        chain: Option<String>,
    ) -> Vec<ProviderEvent> {
        let mut events = Vec::new();

        if let Some(accounts) = accounts {
            if let Some(previous) = self.accounts.replace(accounts.clone()) {
                if previous != accounts {
                    events.push(ProviderEvent::AccountsChanged(accounts));
                }
            }
        }
        if let Some(chain) = chain {
            if let Some(previous) = self.chain.replace(chain.clone()) {
                if previous != chain {
                    events.push(ProviderEvent::ChainChanged(Some(chain)));
                }
            }
        }

        events
    }
}

async fn poll_changes(
    client: RootProvider<Ethereum>,
    events_tx: broadcast::Sender<ProviderEvent>,
    poll_interval: Duration,
) {
    let mut ticker = tokio::time::interval(poll_interval);
    let mut observed = Observed::default();

    loop {
        ticker.tick().await;

        let accounts = match raw_request(&client, methods::ETH_ACCOUNTS, json!([])).await {
            Ok(value) => serde_json::from_value::<Vec<String>>(value).ok(),
            Err(e) => {
                tracing::debug!(error = %e, "Account poll failed");
                None
            }
        };
        let chain = match raw_request(&client, methods::ETH_CHAIN_ID, json!([])).await {
            Ok(Value::String(chain)) => Some(chain),
            Ok(_) => None,
            Err(e) => {
                tracing::debug!(error = %e, "Chain poll failed");
                None
            }
        };

        for event in observed.update(accounts, chain) {
            tracing::debug!(?event, "Provider state changed");
            // No listeners is fine.
            let _ = events_tx.send(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_observation_only_seeds() {
        let mut observed = Observed::default();
        let events = observed.update(Some(vec!["0xa".into()]), Some("0x1".into()));
        assert!(events.is_empty());

        let events = observed.update(Some(vec!["0xa".into()]), Some("0x1".into()));
        assert!(events.is_empty());
    }

    #[test]
    fn test_changes_emit_events() {
        let mut observed = Observed::default();
        observed.update(Some(vec!["0xa".into()]), Some("0x1".into()));

        let events = observed.update(Some(vec!["0xb".into()]), Some("0xa86a".into()));
        assert_eq!(
            events,
            vec![
                ProviderEvent::AccountsChanged(vec!["0xb".into()]),
                ProviderEvent::ChainChanged(Some("0xa86a".into())),
            ]
        );
    }

    #[test]
    fn test_failed_poll_keeps_baseline() {
        let mut observed = Observed::default();
        observed.update(Some(vec!["0xa".into()]), Some("0x1".into()));

        assert!(observed.update(None, None).is_empty());
        assert_eq!(observed.chain.as_deref(), Some("0x1"));
    }

    #[tokio::test]
    async fn test_invalid_url_is_rejected() {
        let config = ProviderConfig {
            rpc_url: "not a url".to_string(),
            ..ProviderConfig::default()
        };
        let err = RpcWalletProvider::connect(&config).unwrap_err();
        assert!(err.to_string().contains("Invalid RPC URL"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let config = ProviderConfig {
            rpc_url: "http://127.0.0.1:1".to_string(),
            ..ProviderConfig::default()
        };
        let provider = RpcWalletProvider::connect(&config).unwrap();
        let err = provider
            .request(methods::ETH_CHAIN_ID, json!([]))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Transport(_)));
    }
}
