//! Wallet-facing types and error definitions.

use std::fmt;
use std::str::FromStr;

use alloy::primitives::{Address, B256, U256, U64};
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// EIP-1193 error code: the user rejected the request.
pub const USER_REJECTED_CODE: i64 = 4001;

/// Wallet error code: the requested chain has not been added to the wallet.
pub const UNRECOGNIZED_CHAIN_CODE: i64 = 4902;

/// Chain ID as published to consumers.
///
/// Always a decimal integer, or the `-1` sentinel when no wallet is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChainId {
    /// No wallet provider, rendered as `-1`.
    #[default]
    Unavailable,
    Id(u64),
}

impl ChainId {
    /// Parse a chain ID as reported by a wallet: `0x`-prefixed hex or decimal.
    pub fn parse_reported(raw: &str) -> Result<Self, ParseError> {
        let raw = raw.trim();
        let parsed = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
            Some(hex) => u64::from_str_radix(hex, 16),
            None => raw.parse::<u64>(),
        };
        parsed
            .map(ChainId::Id)
            .map_err(|_| ParseError::InvalidChainId(raw.to_string()))
    }

    /// Numeric value, `None` for the sentinel.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            ChainId::Unavailable => None,
            ChainId::Id(id) => Some(*id),
        }
    }

    /// `0x`-prefixed lower-case hex, the form wallet requests expect.
    pub fn to_hex(&self) -> Option<String> {
        self.as_u64().map(|id| format!("0x{:x}", id))
    }
}

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        ChainId::Id(id)
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainId::Unavailable => f.write_str("-1"),
            ChainId::Id(id) => write!(f, "{}", id),
        }
    }
}

impl Serialize for ChainId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A wallet account address, always stored lower-case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WalletAddress(String);

impl WalletAddress {
    /// Validate a 20-byte hex address and normalize it to lower case.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let raw = raw.trim();
        Address::from_str(raw).map_err(|_| ParseError::InvalidAddress(raw.to_string()))?;
        Ok(Self(raw.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for WalletAddress {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for WalletAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Errors parsing values reported by a wallet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid chain ID: {0}")]
    InvalidChainId(String),
}

/// Errors returned by a wallet provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// No wallet is injected, or it is not the expected implementation.
    #[error("Wallet provider not available")]
    Unavailable,

    /// The provider rejected the request with an error code.
    #[error("Provider error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The request never reached the provider.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The provider answered with something unexpected.
    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Error code reported by the provider, if any.
    pub fn code(&self) -> Option<i64> {
        match self {
            ProviderError::Rpc { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// The target chain has not been added to the wallet yet.
    pub fn is_unrecognized_chain(&self) -> bool {
        self.code() == Some(UNRECOGNIZED_CHAIN_CODE)
    }

    pub fn is_user_rejected(&self) -> bool {
        self.code() == Some(USER_REJECTED_CODE)
    }
}

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Events pushed by a wallet provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderEvent {
    /// `accountsChanged`: the accounts now exposed, first one active.
    AccountsChanged(Vec<String>),
    /// `chainChanged`: the new chain ID as reported (usually hex).
    ChainChanged(Option<String>),
}

/// Subset of a transaction receipt delivered to transaction watchers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: B256,
    #[serde(default)]
    pub block_number: Option<U64>,
    /// 1 on success, 0 on revert.
    #[serde(default)]
    pub status: Option<U64>,
    #[serde(default)]
    pub gas_used: Option<U256>,
    #[serde(default)]
    pub from: Option<Address>,
    #[serde(default)]
    pub to: Option<Address>,
}

impl TransactionReceipt {
    /// True iff the receipt status equals 1.
    pub fn succeeded(&self) -> bool {
        self.status == Some(U64::from(1))
    }

    /// A receipt only counts as mined once it carries a block number.
    pub fn is_mined(&self) -> bool {
        self.block_number.is_some()
    }
}
