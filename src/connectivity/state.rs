//! Published wallet/chain pair and its update rules.

use serde::Serialize;

use crate::wallet::types::{ChainId, WalletAddress};

/// What consumers see: the active account and the current chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConnectivityState {
    /// Lower-cased active account, `None` until one is known.
    pub wallet: Option<WalletAddress>,
    /// Decimal chain ID, `-1` until one is known.
    pub chain: ChainId,
}

impl ConnectivityState {
    /// Apply an `accountsChanged` payload. Returns true if the state changed.
    ///
    /// Payloads whose first entry is missing or empty are ignored.
    pub fn apply_accounts_changed(&mut self, accounts: &[String]) -> bool {
        let first = match accounts.first().map(|a| a.trim()) {
            Some(first) if !first.is_empty() => first,
            _ => return false,
        };

        let address = match WalletAddress::parse(first) {
            Ok(address) => address,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring accountsChanged with invalid account");
                return false;
            }
        };

        if self.wallet.as_ref() == Some(&address) {
            return false;
        }
        tracing::info!(wallet = %address, "Active account changed");
        self.wallet = Some(address);
        true
    }

    /// Apply a `chainChanged` payload. Returns true if the state changed.
    ///
    /// Null or empty payloads are ignored.
    pub fn apply_chain_changed(&mut self, chain: Option<&str>) -> bool {
        let raw = match chain.map(str::trim) {
            Some(raw) if !raw.is_empty() => raw,
            _ => return false,
        };

        let chain = match ChainId::parse_reported(raw) {
            Ok(chain) => chain,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring chainChanged with invalid chain ID");
                return false;
            }
        };

        if self.chain == chain {
            return false;
        }
        tracing::info!(chain = %chain, "Chain changed");
        self.chain = chain;
        true
    }
}
