//! Redis-backed key-value store.

use crate::domain::repositories::{KeyValueStore, StoreError, StoreResult};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, RedisError, Script, aio::ConnectionManager};
use std::sync::LazyLock;
use tracing::{debug, info};

/// Writes `KEYS[2..]` with `ARGV[1..]` unless `KEYS[1]` already exists.
///
/// Lua scripts run atomically on the server, so no other command can observe
/// or interleave with a partial write.
static SET_ALL_IF_ABSENT: LazyLock<Script> = LazyLock::new(|| {
    Script::new(
        r"
        if redis.call('EXISTS', KEYS[1]) == 1 then
            return 0
        end
        for i = 2, #KEYS do
            redis.call('SET', KEYS[i], ARGV[i - 1])
        end
        return 1
        ",
    )
});

/// Deletes `KEYS[2..]` if `KEYS[1]` holds exactly `ARGV[1]`.
static DEL_IF_EQUALS: LazyLock<Script> = LazyLock::new(|| {
    Script::new(
        r"
        if redis.call('GET', KEYS[1]) ~= ARGV[1] then
            return 0
        end
        redis.call('DEL', unpack(KEYS, 2))
        return 1
        ",
    )
});

/// Redis store using a shared `ConnectionManager`.
///
/// The manager reconnects transparently; each call clones the cheap handle.
/// Errors are propagated to callers, never swallowed.
#[derive(Clone)]
pub struct RedisStore {
    client: ConnectionManager,
}

impl RedisStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string, e.g. `redis://:pass@localhost:6379/0`
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the URL is invalid, the connection cannot
    /// be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> StoreResult<Self> {
        let client = Client::open(redis_url)
            .map_err(|e| StoreError::Connection(format!("Failed to create Redis client: {}", e)))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| StoreError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| StoreError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self { client: manager })
    }
}

fn map_redis_error(e: RedisError) -> StoreError {
    if e.is_io_error() || e.is_connection_dropped() || e.is_connection_refusal() {
        StoreError::Connection(e.to_string())
    } else {
        StoreError::Command(e.to_string())
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut conn = self.client.clone();
        let value = conn
            .get::<_, Option<String>>(key)
            .await
            .map_err(map_redis_error)?;
        debug!(key, found = value.is_some(), "Redis GET");
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut conn = self.client.clone();
        conn.set::<_, _, ()>(key, value)
            .await
            .map_err(map_redis_error)?;
        debug!(key, "Redis SET");
        Ok(())
    }

    async fn del_if_equals(
        &self,
        check_key: &str,
        expected: &str,
        keys: Vec<String>,
    ) -> StoreResult<bool> {
        if keys.is_empty() {
            return Ok(false);
        }

        let mut conn = self.client.clone();

        let mut invocation = DEL_IF_EQUALS.prepare_invoke();
        invocation.key(check_key).arg(expected);
        for key in &keys {
            invocation.key(key);
        }

        let removed: i64 = invocation
            .invoke_async(&mut conn)
            .await
            .map_err(map_redis_error)?;
        debug!(check_key, ?keys, removed, "Redis conditional multi-delete");
        Ok(removed == 1)
    }

    async fn set_all_if_absent(
        &self,
        guard: &str,
        entries: Vec<(String, String)>,
    ) -> StoreResult<bool> {
        let mut conn = self.client.clone();

        let mut invocation = SET_ALL_IF_ABSENT.prepare_invoke();
        invocation.key(guard);
        for (key, value) in &entries {
            invocation.key(key).arg(value);
        }

        let written: i64 = invocation
            .invoke_async(&mut conn)
            .await
            .map_err(map_redis_error)?;
        debug!(guard, written, "Redis conditional multi-set");
        Ok(written == 1)
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
