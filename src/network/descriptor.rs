//! The chain registered with a wallet that does not know it yet.

use serde::{Serialize, Serializer};

use crate::config::NetworkConfig;
use crate::wallet::types::ChainId;

/// Parameters of `wallet_addEthereumChain`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainDescriptor {
    #[serde(serialize_with = "serialize_hex_chain_id")]
    pub chain_id: u64,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
    pub block_explorer_urls: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl ChainDescriptor {
    /// Avalanche Mainnet C-Chain, the default target.
    pub fn avalanche_mainnet() -> Self {
        Self::from(&NetworkConfig::default())
    }

    pub fn chain(&self) -> ChainId {
        ChainId::Id(self.chain_id)
    }

    /// `0x`-prefixed hex chain ID, as wallet requests expect.
    pub fn hex_chain_id(&self) -> String {
        format!("0x{:x}", self.chain_id)
    }
}

impl From<&NetworkConfig> for ChainDescriptor {
    fn from(config: &NetworkConfig) -> Self {
        Self {
            chain_id: config.chain_id,
            chain_name: config.chain_name.clone(),
            native_currency: NativeCurrency {
                name: config.native_currency.name.clone(),
                symbol: config.native_currency.symbol.clone(),
                decimals: config.native_currency.decimals,
            },
            rpc_urls: config.rpc_urls.clone(),
            block_explorer_urls: config.block_explorer_urls.clone(),
        }
    }
}

fn serialize_hex_chain_id<S: Serializer>(chain_id: &u64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&format_args!("0x{:x}", chain_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hex_chain_id() {
        let descriptor = ChainDescriptor::avalanche_mainnet();
        assert_eq!(descriptor.hex_chain_id(), "0xa86a");
        assert_eq!(descriptor.chain(), ChainId::Id(43114));
    }

    #[test]
    fn test_add_chain_payload() {
        let descriptor = ChainDescriptor::avalanche_mainnet();
        assert_eq!(
            serde_json::to_value(&descriptor).unwrap(),
            json!({
                "chainId": "0xa86a",
                "chainName": "Avalanche Mainnet C-Chain",
                "nativeCurrency": { "name": "Avalanche", "symbol": "AVAX", "decimals": 18 },
                "rpcUrls": ["https://api.avax.network/ext/bc/C/rpc"],
                "blockExplorerUrls": ["https://snowtrace.io"]
            })
        );
    }
}
