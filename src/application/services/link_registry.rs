//! Short link registry: create, resolve and delete aliases.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, error, info, warn};

use crate::domain::entities::{Link, NewLink};
use crate::domain::namespace::{admin_pw_key, link_keys, short_key};
use crate::domain::repositories::KeyValueStore;
use crate::error::AppError;
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validation::{validate_alias, validate_destination};

/// Service owning the alias protocol over a key-value store.
///
/// Each alias occupies two keys, `short:<alias>` and `admin:pw:<alias>`.
/// They are written by one conditional multi-set and removed by one conditional
/// multi-key delete, so readers never see one without the other.
///
/// The registry holds no state of its own and is shared between request
/// handlers behind an `Arc`.
pub struct ShortLinkRegistry {
    store: Arc<dyn KeyValueStore>,
}

impl ShortLinkRegistry {
    /// Creates a registry over the given store.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Returns the destination stored for `alias`, unmodified.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the alias is not registered.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn resolve(&self, alias: &str) -> Result<String, AppError> {
        match self.store.get(&short_key(alias)).await? {
            Some(destination) => {
                metrics::counter!("link_redirects_total").increment(1);
                Ok(destination)
            }
            None => {
                debug!(alias, "Alias not found");
                Err(AppError::not_found(
                    "Short link not found",
                    json!({ "key": alias }),
                ))
            }
        }
    }

    /// Registers `alias` pointing at `destination`, protected by `admin_password`.
    ///
    /// # Validation
    ///
    /// Checked in order, first failure wins, before any store access:
    ///
    /// 1. `destination` is not empty
    /// 2. `admin_password` is not empty
    /// 3. `alias` is a valid URI path segment
    /// 4. `destination` is an absolute URL
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] naming the offending field in `details.field`.
    /// Returns [`AppError::Conflict`] if the alias is already registered; the
    /// existing link is never overwritten.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn create(
        &self,
        alias: &str,
        destination: &str,
        admin_password: &str,
    ) -> Result<Link, AppError> {
        if destination.is_empty() {
            return Err(AppError::bad_request(
                "URL is required",
                json!({ "field": "url" }),
            ));
        }

        if admin_password.is_empty() {
            return Err(AppError::bad_request(
                "Admin password is required",
                json!({ "field": "admin_pw" }),
            ));
        }

        validate_alias(alias)?;
        validate_destination(destination)?;

        let new_link = NewLink {
            alias: alias.to_string(),
            destination: destination.to_string(),
            admin_digest: hash_password(admin_password),
        };

        let guard = short_key(&new_link.alias);
        let entries = vec![
            (guard.clone(), new_link.destination.clone()),
            (admin_pw_key(&new_link.alias), new_link.admin_digest.clone()),
        ];

        if !self.store.set_all_if_absent(&guard, entries).await? {
            return Err(AppError::conflict(
                "Duplicated Key",
                json!({ "key": alias }),
            ));
        }

        info!(alias, "Short link created");
        metrics::counter!("links_created_total").increment(1);

        Ok(new_link.into_link())
    }

    /// Deletes `alias` after checking `admin_password` against the stored digest.
    ///
    /// Both the destination and the digest are removed together, and only
    /// while the stored digest is still the one that was checked.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the password is empty.
    /// Returns [`AppError::NotFound`] if the alias is not registered.
    /// Returns [`AppError::Unauthorized`] if the password does not match, or if
    /// the alias was re-created with another password before the delete ran.
    /// Returns [`AppError::Internal`] on store errors, or if the alias exists
    /// without a stored digest.
    pub async fn delete(&self, alias: &str, admin_password: &str) -> Result<(), AppError> {
        if admin_password.is_empty() {
            return Err(AppError::bad_request(
                "Admin password is required",
                json!({ "field": "admin_pw" }),
            ));
        }

        if self.store.get(&short_key(alias)).await?.is_none() {
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "key": alias }),
            ));
        }

        let Some(stored_digest) = self.store.get(&admin_pw_key(alias)).await? else {
            error!(alias, "Alias exists without an admin password digest");
            return Err(AppError::internal("Inconsistent link state", json!({})));
        };

        if !verify_password(admin_password, &stored_digest) {
            warn!(alias, "Rejected delete with wrong admin password");
            metrics::counter!("link_delete_denied_total").increment(1);
            return Err(AppError::unauthorized("Unauthorized", json!({})));
        }

        // The pair is removed only if the digest is still the one just
        // verified; a concurrent delete and re-create leaves the new link alone.
        let removed = self
            .store
            .del_if_equals(&admin_pw_key(alias), &stored_digest, link_keys(alias))
            .await?;
        if !removed {
            warn!(alias, "Admin password digest changed during delete");
            metrics::counter!("link_delete_denied_total").increment(1);
            return Err(AppError::unauthorized("Unauthorized", json!({})));
        }

        info!(alias, "Short link deleted");
        metrics::counter!("links_deleted_total").increment(1);

        Ok(())
    }

    /// Checks that the backing store answers.
    pub async fn health_check(&self) -> bool {
        self.store.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockKeyValueStore, StoreError};
    use crate::infrastructure::store::MemoryStore;

    fn registry_with(store: MockKeyValueStore) -> ShortLinkRegistry {
        ShortLinkRegistry::new(Arc::new(store))
    }

    fn field_of(err: &AppError) -> &str {
        err.details()["field"].as_str().unwrap_or_default()
    }

    #[tokio::test]
    async fn test_create_validation_order_without_store_access() {
        // A mock with no expectations panics on any call.
        let registry = registry_with(MockKeyValueStore::new());

        let err = registry.create("", "http://x", "pw").await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(field_of(&err), "key");

        let err = registry.create("k", "", "pw").await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(field_of(&err), "url");
        assert_eq!(err.message(), "URL is required");

        let err = registry.create("k", "http://x", "").await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(field_of(&err), "admin_pw");
        assert_eq!(err.message(), "Admin password is required");
    }

    #[tokio::test]
    async fn test_create_empty_url_wins_over_empty_password() {
        let registry = registry_with(MockKeyValueStore::new());

        let err = registry.create("bad key", "", "").await.unwrap_err();
        assert_eq!(field_of(&err), "url");
    }

    #[tokio::test]
    async fn test_create_alias_checked_before_url_format() {
        let registry = registry_with(MockKeyValueStore::new());

        let err = registry
            .create("bad key", "not a url", "pw")
            .await
            .unwrap_err();
        assert_eq!(field_of(&err), "key");

        let err = registry.create("good", "not-a-url", "pw").await.unwrap_err();
        assert_eq!(field_of(&err), "url");
    }

    #[tokio::test]
    async fn test_create_writes_both_keys_atomically() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_set_all_if_absent()
            .withf(|guard, entries| {
                guard == "short:docs"
                    && entries.len() == 2
                    && entries[0] == ("short:docs".to_string(), "https://example.com".to_string())
                    && entries[1].0 == "admin:pw:docs"
                    && entries[1].1 == hash_password("pw")
            })
            .times(1)
            .returning(|_, _| Ok(true));

        let registry = registry_with(store);
        let link = registry
            .create("docs", "https://example.com", "pw")
            .await
            .unwrap();

        assert_eq!(link.alias, "docs");
        assert_eq!(link.destination, "https://example.com");
    }

    #[tokio::test]
    async fn test_create_conflict() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_set_all_if_absent()
            .times(1)
            .returning(|_, _| Ok(false));

        let registry = registry_with(store);
        let err = registry
            .create("taken", "https://example.com", "pw")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_create_store_error_is_internal() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_set_all_if_absent()
            .returning(|_, _| Err(StoreError::Connection("down".to_string())));

        let registry = registry_with(store);
        let err = registry
            .create("docs", "https://example.com", "pw")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_get()
            .withf(|key| key == "short:missing")
            .returning(|_| Ok(None));

        let registry = registry_with(store);
        let err = registry.resolve("missing").await.unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_returns_value_unmodified() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_get()
            .returning(|_| Ok(Some("HTTPS://Example.COM:443/Path/".to_string())));

        let registry = registry_with(store);
        let destination = registry.resolve("x").await.unwrap();

        assert_eq!(destination, "HTTPS://Example.COM:443/Path/");
    }

    #[tokio::test]
    async fn test_delete_empty_password_without_store_access() {
        let registry = registry_with(MockKeyValueStore::new());

        let err = registry.delete("docs", "").await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(field_of(&err), "admin_pw");
    }

    #[tokio::test]
    async fn test_delete_unknown_alias() {
        let mut store = MockKeyValueStore::new();
        store.expect_get().times(1).returning(|_| Ok(None));
        store.expect_del_if_equals().times(0);

        let registry = registry_with(store);
        let err = registry.delete("missing", "pw").await.unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_missing_digest_is_internal() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_get()
            .withf(|key| key == "short:orphan")
            .returning(|_| Ok(Some("https://example.com".to_string())));
        store
            .expect_get()
            .withf(|key| key == "admin:pw:orphan")
            .returning(|_| Ok(None));
        store.expect_del_if_equals().times(0);

        let registry = registry_with(store);
        let err = registry.delete("orphan", "pw").await.unwrap_err();

        assert!(matches!(err, AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_delete_wrong_password() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_get()
            .withf(|key| key == "short:docs")
            .returning(|_| Ok(Some("https://example.com".to_string())));
        store
            .expect_get()
            .withf(|key| key == "admin:pw:docs")
            .returning(|_| Ok(Some(hash_password("right"))));
        store.expect_del_if_equals().times(0);

        let registry = registry_with(store);
        let err = registry.delete("docs", "wrong").await.unwrap_err();

        assert!(matches!(err, AppError::Unauthorized { .. }));
        assert_eq!(err.details(), &json!({}));
    }

    #[tokio::test]
    async fn test_delete_removes_both_keys() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_get()
            .withf(|key| key == "short:docs")
            .returning(|_| Ok(Some("https://example.com".to_string())));
        store
            .expect_get()
            .withf(|key| key == "admin:pw:docs")
            .returning(|_| Ok(Some(hash_password("right"))));
        store
            .expect_del_if_equals()
            .withf(|check_key, expected, keys| {
                check_key == "admin:pw:docs"
                    && expected == hash_password("right")
                    && keys == &vec!["short:docs".to_string(), "admin:pw:docs".to_string()]
            })
            .times(1)
            .returning(|_, _, _| Ok(true));

        let registry = registry_with(store);
        assert!(registry.delete("docs", "right").await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_denied_when_digest_changes_before_removal() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_get()
            .withf(|key| key == "short:docs")
            .returning(|_| Ok(Some("https://example.com".to_string())));
        store
            .expect_get()
            .withf(|key| key == "admin:pw:docs")
            .returning(|_| Ok(Some(hash_password("right"))));
        store
            .expect_del_if_equals()
            .times(1)
            .returning(|_, _, _| Ok(false));

        let registry = registry_with(store);
        let err = registry.delete("docs", "right").await.unwrap_err();

        assert!(matches!(err, AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_round_trip_on_memory_store() {
        let store = Arc::new(MemoryStore::new());
        let registry = ShortLinkRegistry::new(store.clone());

        registry
            .create("docs", "https://example.com/a?b=1", "pw")
            .await
            .unwrap();
        assert_eq!(
            registry.resolve("docs").await.unwrap(),
            "https://example.com/a?b=1"
        );

        let err = registry
            .create("docs", "https://other.example.com", "other")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));
        assert_eq!(
            registry.resolve("docs").await.unwrap(),
            "https://example.com/a?b=1"
        );

        registry.delete("docs", "pw").await.unwrap();
        assert!(matches!(
            registry.resolve("docs").await.unwrap_err(),
            AppError::NotFound { .. }
        ));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_create_heals_stale_digest() {
        let store = Arc::new(MemoryStore::with_entries([(
            "admin:pw:docs",
            hash_password("old"),
        )]));
        let registry = ShortLinkRegistry::new(store);

        registry
            .create("docs", "https://example.com", "new")
            .await
            .unwrap();

        let err = registry.delete("docs", "old").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized { .. }));
        assert!(registry.delete("docs", "new").await.is_ok());
    }
}
