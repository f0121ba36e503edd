#![allow(dead_code)]

use async_trait::async_trait;
use axum::ServiceExt;
use axum::extract::Request;
use axum_test::TestServer;
use metrics_exporter_prometheus::PrometheusHandle;
use short_url::domain::repositories::{KeyValueStore, StoreError, StoreResult};
use short_url::infrastructure::store::MemoryStore;
use short_url::routes::app_router;
use short_url::server::install_metrics_recorder;
use short_url::state::AppState;
use std::sync::{Arc, OnceLock};

static METRICS: OnceLock<PrometheusHandle> = OnceLock::new();

/// The recorder is global, so every server in a test binary shares one.
pub fn metrics_handle() -> PrometheusHandle {
    METRICS
        .get_or_init(|| install_metrics_recorder().unwrap())
        .clone()
}

/// Store whose every command fails, as if Redis went away.
pub struct FailingStore;

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> StoreResult<Option<String>> {
        Err(StoreError::Connection("connection refused".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
        Err(StoreError::Connection("connection refused".to_string()))
    }

    async fn del_if_equals(
        &self,
        _check_key: &str,
        _expected: &str,
        _keys: Vec<String>,
    ) -> StoreResult<bool> {
        Err(StoreError::Connection("connection refused".to_string()))
    }

    async fn set_all_if_absent(
        &self,
        _guard: &str,
        _entries: Vec<(String, String)>,
    ) -> StoreResult<bool> {
        Err(StoreError::Connection("connection refused".to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }
}

/// Test server running the full application router, middleware included.
pub fn create_app_server(store: Arc<dyn KeyValueStore>) -> TestServer {
    let app = app_router(AppState::new(store, metrics_handle()));
    TestServer::new(ServiceExt::<Request>::into_make_service(app)).unwrap()
}

/// Test server over a fresh in-memory store, returned alongside the store.
pub fn create_test_server() -> (TestServer, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let server = create_app_server(store.clone());
    (server, store)
}

pub fn create_failing_server() -> TestServer {
    create_app_server(Arc::new(FailingStore))
}

pub async fn create_test_link(store: &MemoryStore, alias: &str, url: &str, password: &str) {
    store
        .set(&format!("short:{alias}"), url)
        .await
        .unwrap();
    store
        .set(
            &format!("admin:pw:{alias}"),
            &short_url::utils::password::hash_password(password),
        )
        .await
        .unwrap();
}
