//! Cancellable listener registrations.

use std::future::Future;

use tokio::task::JoinHandle;

/// Handle to a running listener task.
///
/// Dropping the handle (or calling [`unsubscribe`](Self::unsubscribe))
/// stops delivery.
#[derive(Debug)]
#[must_use = "dropping a Subscription cancels it"]
pub struct Subscription {
    task: JoinHandle<()>,
    joined: bool,
}

impl Subscription {
    pub(crate) fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self {
            task: tokio::spawn(future),
            joined: false,
        }
    }

    /// Stop the listener.
    pub fn unsubscribe(self) {}

    /// True once the listener has exited on its own or was cancelled.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the listener to exit. Returns immediately if it already has.
    pub async fn finished(&mut self) {
        if self.joined {
            return;
        }
        let result = (&mut self.task).await;
        self.joined = true;
        if let Err(e) = result {
            if e.is_panic() {
                tracing::error!(error = %e, "Listener task panicked");
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}
