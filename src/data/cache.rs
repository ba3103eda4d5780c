//! Query response cache.
//!
//! Keyed by query text plus variables. `serde_json` maps are ordered, so
//! variables that differ only in key order share an entry.

use dashmap::DashMap;
use serde_json::Value;

use crate::data::types::GraphQlRequest;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    query: String,
    variables: String,
}

impl CacheKey {
    pub fn for_request(request: &GraphQlRequest) -> Self {
        Self {
            query: request.query.trim().to_string(),
            variables: request
                .variables
                .as_ref()
                .map(Value::to_string)
                .unwrap_or_default(),
        }
    }
}

/// Thread-safe map of query → `data` payload.
#[derive(Debug, Default)]
pub struct ResponseCache {
    entries: DashMap<CacheKey, Value>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<Value> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    pub fn insert(&self, key: CacheKey, data: Value) {
        self.entries.insert(key, data);
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
