//! In-memory provider with scripted responses.
//!
//! Stands in for a browser wallet in tests; built under `cfg(test)` or the
//! `test-util` feature. Responses are queued per method; the last queued
//! response for a method repeats once the queue is down to one entry, until a
//! new response is queued. Every request is recorded.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::broadcast;

use crate::wallet::provider::Eip1193Provider;
use crate::wallet::types::{ProviderError, ProviderEvent, ProviderResult};

/// JSON-RPC "method not found".
const METHOD_NOT_FOUND_CODE: i64 = -32601;

const EVENT_CAPACITY: usize = 64;

/// A request received by a [`ScriptedProvider`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: String,
    pub params: Value,
}

#[derive(Debug, Default)]
struct Script {
    queue: VecDeque<ProviderResult<Value>>,
    /// The last remaining entry has been served at least once.
    sticky_served: bool,
}

#[derive(Debug)]
pub struct ScriptedProvider {
    is_metamask: bool,
    responses: Mutex<HashMap<String, Script>>,
    calls: Mutex<Vec<RecordedCall>>,
    events_tx: broadcast::Sender<ProviderEvent>,
}

impl ScriptedProvider {
    /// A provider that identifies as MetaMask.
    pub fn new() -> Self {
        Self::with_identity(true)
    }

    pub fn with_identity(is_metamask: bool) -> Self {
        let (events_tx, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            is_metamask,
            responses: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            events_tx,
        }
    }

    /// Queue a response for `method`.
    pub fn respond(&self, method: &str, response: ProviderResult<Value>) {
        let mut responses = self.responses.lock().unwrap_or_else(PoisonError::into_inner);
        let script = responses.entry(method.to_string()).or_default();
        // A sticky entry that was already served is replaced, not queued behind.
        if script.sticky_served {
            script.queue.clear();
            script.sticky_served = false;
        }
        script.queue.push_back(response);
    }

    /// Push an event to every live listener. Returns how many received it.
    pub fn emit(&self, event: ProviderEvent) -> usize {
        self.events_tx.send(event).unwrap_or(0)
    }

    /// Every request received so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Number of requests received for `method`.
    pub fn calls_to(&self, method: &str) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    fn next_response(&self, method: &str) -> ProviderResult<Value> {
        let mut responses = self.responses.lock().unwrap_or_else(PoisonError::into_inner);
        let script = match responses.get_mut(method) {
            Some(script) if !script.queue.is_empty() => script,
            _ => {
                return Err(ProviderError::Rpc {
                    code: METHOD_NOT_FOUND_CODE,
                    message: format!("method {} not scripted", method),
                })
            }
        };

        if script.queue.len() > 1 {
            script.queue.pop_front().unwrap_or(Ok(Value::Null))
        } else {
            script.sticky_served = true;
            script.queue.front().cloned().unwrap_or(Ok(Value::Null))
        }
    }
}

impl Default for ScriptedProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Eip1193Provider for ScriptedProvider {
    fn is_metamask(&self) -> bool {
        self.is_metamask
    }

    async fn request(&self, method: &str, params: Value) -> ProviderResult<Value> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedCall {
                method: method.to_string(),
                params,
            });
        self.next_response(method)
    }

    fn events(&self) -> broadcast::Receiver<ProviderEvent> {
        self.events_tx.subscribe()
    }
}
