use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

pub mod memory;
pub mod null;
pub mod redis;

/// Errors that can occur during mirror store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to serialize record: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Failed to parse record: {0}")]
    Deserialization(String),
    #[error("Redis error: {0}")]
    Redis(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Interface every mirror store backend must fulfill.
///
/// The store holds local copies of upstream records (courses, users) as
/// JSON-serialized values. There is no reconciliation with the upstream
/// beyond "create if locally absent", so the interface is a plain
/// get/set/delete. Implementations must be thread-safe and cloneable so a
/// single store can be shared across request handlers.
#[async_trait::async_trait]
#[allow(dead_code)]
pub trait StoreBackend: Send + Sync {
    /// Write a mirrored record under the given key
    async fn set<T: Serialize + Send + Sync>(&self, key: &str, value: &T)
        -> Result<(), StoreError>;

    /// Read a mirrored record, None on a miss
    async fn get<T: DeserializeOwned + Send + Sync>(
        &self,
        key: &str,
    ) -> Result<Option<T>, StoreError>;

    /// Checks that the backend is reachable. For Redis this pings the
    /// server; the in-memory and null backends are always healthy.
    async fn health_check(&self) -> Result<(), String>;

    /// Remove a mirrored record
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}

/// Mirror store dispatching to the backend chosen at startup.
#[derive(Clone)]
pub enum Store {
    /// In-memory store backed by Moka
    InMemory(memory::InMemoryStore),
    /// Redis-backed store
    Redis(redis::RedisStore),
    /// No-op store; every read misses so every request goes upstream
    Null(null::NullStore),
}

#[async_trait::async_trait]
impl StoreBackend for Store {
    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<(), StoreError> {
        match self {
            Self::InMemory(store) => store.set(key, value).await,
            Self::Redis(store) => store.set(key, value).await,
            Self::Null(store) => store.set(key, value).await,
        }
    }

    async fn get<T: DeserializeOwned + Send + Sync>(
        &self,
        key: &str,
    ) -> Result<Option<T>, StoreError> {
        match self {
            Self::InMemory(store) => store.get(key).await,
            Self::Redis(store) => store.get(key).await,
            Self::Null(store) => store.get(key).await,
        }
    }

    async fn health_check(&self) -> Result<(), String> {
        match self {
            Self::InMemory(store) => store.health_check().await,
            Self::Redis(store) => store.health_check().await,
            Self::Null(store) => store.health_check().await,
        }
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        match self {
            Self::InMemory(store) => store.delete(key).await,
            Self::Redis(store) => store.delete(key).await,
            Self::Null(store) => store.delete(key).await,
        }
    }
}

/// Creates the mirror store selected by the configuration.
pub async fn create_store(config: &crate::config::GatewayConfig) -> Result<Store, StoreError> {
    match config.store.backend {
        crate::config::StoreBackendKind::InMemory => {
            let store = memory::InMemoryStore::new(
                config.store.ttl as u64,
                config.store.memory.capacity,
            )
            .map_err(StoreError::Config)?;
            Ok(Store::InMemory(store))
        }
        crate::config::StoreBackendKind::Redis => {
            if config.store.redis.url.is_empty() {
                return Err(StoreError::Config(
                    "Redis URL is required for the Redis store".to_string(),
                ));
            }
            let store = redis::RedisStore::new(&config.store.redis.url, config.store.ttl as u64)
                .await
                .map_err(StoreError::Config)?;
            Ok(Store::Redis(store))
        }
        crate::config::StoreBackendKind::None => Ok(Store::Null(null::NullStore::new())),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::store::memory::InMemoryStore;
    use serde::{Deserialize, Serialize};
    use std::time::Duration;

    #[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
    struct TestRecord {
        field: String,
    }

    #[tokio::test]
    async fn test_store_basic_operations() {
        let memory_store = InMemoryStore::new(60, 128).expect("Failed to create store");
        let store = Store::InMemory(memory_store);

        let record = TestRecord {
            field: "mirrored".to_string(),
        };
        store
            .set("course:1", &record)
            .await
            .expect("Failed to set record");
        let value: Option<TestRecord> = store.get("course:1").await.expect("Failed to get record");
        assert_eq!(value, Some(record));

        let value: Option<TestRecord> = store
            .get("course:missing")
            .await
            .expect("Failed to get record");
        assert_eq!(value, None);

        store
            .delete("course:1")
            .await
            .expect("Failed to delete record");
        let value: Option<TestRecord> = store.get("course:1").await.expect("Failed to get record");
        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn test_store_ttl_expiry() {
        let memory_store = InMemoryStore::new(1, 128).expect("Failed to create store");
        let store = Store::InMemory(memory_store);

        let record = TestRecord {
            field: "stale".to_string(),
        };
        store
            .set("course:2", &record)
            .await
            .expect("Failed to set record");

        let value: Option<TestRecord> = store.get("course:2").await.expect("Failed to get record");
        assert_eq!(value, Some(record));

        tokio::time::sleep(Duration::from_secs(2)).await;

        let value: Option<TestRecord> = store.get("course:2").await.expect("Failed to get record");
        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn test_create_store_from_config() {
        let mut config = crate::config::GatewayConfig::default();
        config.store.backend = crate::config::StoreBackendKind::InMemory;
        let store = create_store(&config).await.expect("Failed to create store");
        assert!(matches!(store, Store::InMemory(_)));

        config.store.backend = crate::config::StoreBackendKind::None;
        let store = create_store(&config).await.expect("Failed to create store");
        assert!(matches!(store, Store::Null(_)));
    }

    #[tokio::test]
    async fn test_create_store_rejects_redis_without_url() {
        let mut config = crate::config::GatewayConfig::default();
        config.store.backend = crate::config::StoreBackendKind::Redis;
        let result = create_store(&config).await;
        assert!(matches!(result, Err(StoreError::Config(_))));
    }
}
