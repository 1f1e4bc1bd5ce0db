use std::sync::Arc;

use dashmap::DashMap;
use futures::future::{BoxFuture, FutureExt};
use serde_json::Value;

use super::{ScoreboardStore, StoreKey};
use crate::dao::storage::StorageResult;

/// Process-local store; the session is lost when the process exits.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<DashMap<&'static str, Value>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreboardStore for MemoryStore {
    fn get(&self, key: StoreKey) -> BoxFuture<'static, StorageResult<Option<Value>>> {
        let value = self
            .entries
            .get(key.as_str())
            .map(|entry| entry.value().clone());
        futures::future::ready(Ok(value)).boxed()
    }

    fn put_all(&self, entries: Vec<(StoreKey, Value)>) -> BoxFuture<'static, StorageResult<()>> {
        for (key, value) in entries {
            self.entries.insert(key.as_str(), value);
        }
        futures::future::ready(Ok(())).boxed()
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        futures::future::ready(Ok(())).boxed()
    }
}
