//! First-run configuration stored in the key-value store.

use anyhow::{Context, Result};
use tracing::info;

use crate::domain::namespace::CONF_ADDR_KEY;
use crate::domain::repositories::KeyValueStore;

/// Resolves the address the HTTP server binds to.
///
/// Reads `conf:addr`. When the key is missing, `default_addr` is written
/// and returned, so later starts pick up the same value. A stored value is
/// used as-is.
///
/// # Errors
///
/// Returns an error if the store cannot be read or the default cannot be
/// written. Callers treat this as fatal.
pub async fn resolve_listen_addr(store: &dyn KeyValueStore, default_addr: &str) -> Result<String> {
    let stored = store
        .get(CONF_ADDR_KEY)
        .await
        .context("Failed to read listen address from store")?;

    if let Some(addr) = stored {
        info!(addr, "Using listen address from store");
        return Ok(addr);
    }

    store
        .set(CONF_ADDR_KEY, default_addr)
        .await
        .context("Failed to persist default listen address")?;
    info!(addr = default_addr, "Stored default listen address");

    Ok(default_addr.to_string())
}
