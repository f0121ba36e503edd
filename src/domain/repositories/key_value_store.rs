//! Storage contract for the key-value backend.

use async_trait::async_trait;

/// Errors reported by a key-value store backend.
///
/// A missing key is not an error: lookups return `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store connection error: {0}")]
    Connection(String),

    #[error("Store command error: {0}")]
    Command(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// A flat namespace of UTF-8 string keys and values.
///
/// Besides plain GET/SET/DEL, implementations expose the two atomic
/// primitives the registry relies on to keep an alias and its credential
/// digest paired: a conditional multi-key write and a conditional multi-key
/// delete.
///
/// # Implementations
///
/// - [`crate::infrastructure::store::RedisStore`] - Redis-backed store
/// - [`crate::infrastructure::store::MemoryStore`] - In-process store for development and tests
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads a value.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` if the key exists
    /// - `Ok(None)` if it does not
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend is unreachable or the command fails.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Writes a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Removes all `keys` in one atomic step, but only if `check_key` currently
    /// holds exactly `expected`.
    ///
    /// Returns `Ok(false)` without removing anything when `check_key` is missing
    /// or holds another value.
    async fn del_if_equals(
        &self,
        check_key: &str,
        expected: &str,
        keys: Vec<String>,
    ) -> StoreResult<bool>;

    /// Writes every entry in one atomic step, but only if `guard` does not exist.
    ///
    /// Returns `Ok(false)` without writing anything when `guard` is present.
    async fn set_all_if_absent(
        &self,
        guard: &str,
        entries: Vec<(String, String)>,
    ) -> StoreResult<bool>;

    /// Checks that the backend answers.
    async fn health_check(&self) -> bool;
}
