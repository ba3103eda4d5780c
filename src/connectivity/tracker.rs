//! Keeps [`ConnectivityState`] in sync with the wallet.
//!
//! Activation registers the account and chain listeners, then starts the
//! initial load. The load and the first events are not ordered: whichever
//! writes last wins.

use std::sync::Arc;

use tokio::sync::watch;

use crate::connectivity::state::ConnectivityState;
use crate::wallet::adapter::WalletAdapter;
use crate::wallet::subscription::Subscription;
use crate::wallet::types::{ChainId, WalletAddress};

/// Reactive holder of the published wallet/chain pair.
#[derive(Debug, Clone)]
pub struct ConnectivityTracker {
    state: Arc<watch::Sender<ConnectivityState>>,
}

impl ConnectivityTracker {
    pub fn new() -> Self {
        let (state, _) = watch::channel(ConnectivityState::default());
        Self {
            state: Arc::new(state),
        }
    }

    /// Current state.
    pub fn snapshot(&self) -> ConnectivityState {
        self.state.borrow().clone()
    }

    pub fn wallet(&self) -> Option<WalletAddress> {
        self.state.borrow().wallet.clone()
    }

    pub fn chain(&self) -> ChainId {
        self.state.borrow().chain
    }

    /// Receiver notified on every published change.
    pub fn watch(&self) -> watch::Receiver<ConnectivityState> {
        self.state.subscribe()
    }

    /// Register listeners on `adapter` and start the initial load.
    ///
    /// Activating again registers a second set of listeners; it does not
    /// replace the first. Dropping the returned [`Activation`] tears its
    /// listeners down.
    pub fn activate(&self, adapter: &WalletAdapter) -> Activation {
        let mut subscriptions = Vec::with_capacity(2);

        let state = self.state.clone();
        if let Some(sub) = adapter.subscribe_accounts_changed(move |accounts| {
            state.send_if_modified(|s| s.apply_accounts_changed(&accounts));
        }) {
            subscriptions.push(sub);
        }

        let state = self.state.clone();
        if let Some(sub) = adapter.subscribe_chain_changed(move |chain| {
            state.send_if_modified(|s| s.apply_chain_changed(chain.as_deref()));
        }) {
            subscriptions.push(sub);
        }

        let initial_load = Subscription::spawn(load_initial(adapter.clone(), self.state.clone()));

        Activation {
            subscriptions,
            initial_load,
        }
    }
}

impl Default for ConnectivityTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Publish the wallet's current address, then its chain.
///
/// A failed chain query leaves the published chain as it was.
async fn load_initial(adapter: WalletAdapter, state: Arc<watch::Sender<ConnectivityState>>) {
    let wallet = adapter.get_address().await;
    state.send_if_modified(|s| {
        let changed = s.wallet != wallet;
        s.wallet = wallet;
        changed
    });

    match adapter.query_chain().await {
        Ok(chain) => {
            state.send_if_modified(|s| {
                let changed = s.chain != chain;
                s.chain = chain;
                changed
            });
        }
        Err(e) => tracing::debug!(error = %e, "Initial chain load discarded"),
    }

    let snapshot = state.borrow().clone();
    tracing::debug!(
        wallet = ?snapshot.wallet.as_ref().map(|w| w.as_str()),
        chain = %snapshot.chain,
        "Initial connectivity loaded"
    );
}

/// Listeners and initial load registered by one [`ConnectivityTracker::activate`].
#[derive(Debug)]
#[must_use = "dropping an Activation removes its listeners"]
pub struct Activation {
    subscriptions: Vec<Subscription>,
    initial_load: Subscription,
}

impl Activation {
    /// Wait until the initial load has published.
    pub async fn loaded(&mut self) {
        self.initial_load.finished().await;
    }

    /// Number of live provider listeners (0 without a wallet).
    pub fn listener_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Remove all listeners.
    pub fn deactivate(self) {}
}
