//! Target network switching.
//!
//! ```text
//! NetworkConfig → descriptor.rs (ChainDescriptor) → switch.rs (NetworkSwitcher)
//!     → wallet_switchEthereumChain / wallet_addEthereumChain via WalletAdapter
//! ```

pub mod descriptor;
pub mod switch;

pub use descriptor::{ChainDescriptor, NativeCurrency};
pub use switch::{NetworkSwitcher, SwitchOutcome};
