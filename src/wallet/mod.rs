//! Wallet provider subsystem.
//!
//! # Data Flow
//! ```text
//! injected provider (Eip1193Provider: browser wallet, RPC endpoint, scripted)
//!     → adapter.rs (presence check, account/chain lookup, connect, tx watch)
//!     → subscription.rs (cancellable accountsChanged / chainChanged listeners)
//!     → connectivity tracker / network switch flow
//! ```
//!
//! # Constraints
//! - The provider is always passed in; no global lookup
//! - A missing wallet is never an error to the caller
//! - Addresses are lower-cased, chain IDs decimal or `-1`

pub mod adapter;
pub mod provider;
pub mod rpc;
#[cfg(any(test, feature = "test-util"))]
pub mod scripted;
pub mod subscription;
pub mod types;

pub use adapter::WalletAdapter;
pub use provider::Eip1193Provider;
pub use rpc::RpcWalletProvider;
#[cfg(any(test, feature = "test-util"))]
pub use scripted::ScriptedProvider;
pub use subscription::Subscription;
pub use types::{ChainId, ProviderError, ProviderEvent, TransactionReceipt, WalletAddress};
