//! In-process key-value store for local development and tests.

use crate::domain::repositories::{KeyValueStore, StoreResult};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// A store kept in a single locked map.
///
/// Every operation takes the lock once, so multi-key operations are atomic
/// with respect to each other. Contents are lost when the process exits.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        debug!("Using MemoryStore (data is not persisted)");
        Self::default()
    }

    /// Creates a store pre-populated with `entries`.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: RwLock::new(map),
        }
    }

    /// Number of keys currently held.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the store holds no keys.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn del_if_equals(
        &self,
        check_key: &str,
        expected: &str,
        keys: Vec<String>,
    ) -> StoreResult<bool> {
        let mut entries = self.entries.write().await;
        if entries.get(check_key).map(String::as_str) != Some(expected) {
            return Ok(false);
        }
        for key in &keys {
            entries.remove(key);
        }
        Ok(true)
    }

    async fn set_all_if_absent(
        &self,
        guard: &str,
        entries: Vec<(String, String)>,
    ) -> StoreResult<bool> {
        let mut map = self.entries.write().await;
        if map.contains_key(guard) {
            return Ok(false);
        }
        map.extend(entries);
        Ok(true)
    }

    async fn health_check(&self) -> bool {
        true
    }
}
