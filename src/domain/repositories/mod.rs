//! Storage trait definitions for the domain layer.
//!
//! The traits here describe what the application layer needs from storage.
//! Concrete backends live in `crate::infrastructure::store`; mock
//! implementations are generated via `mockall` for unit tests.

pub mod key_value_store;

pub use key_value_store::{KeyValueStore, StoreError, StoreResult};

#[cfg(test)]
pub use key_value_store::MockKeyValueStore;
