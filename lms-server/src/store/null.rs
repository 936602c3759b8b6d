use super::{StoreBackend, StoreError};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

/// NullStore disables mirroring: writes are dropped and every read misses,
/// so each inbound request falls through to the upstream fetch.
#[derive(Clone, Debug)]
pub struct NullStore;

impl NullStore {
    /// Create a new NullStore instance
    pub fn new() -> Self {
        NullStore
    }
}

impl Default for NullStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StoreBackend for NullStore {
    async fn set<T: Serialize + Send + Sync>(
        &self,
        _key: &str,
        _value: &T,
    ) -> Result<(), StoreError> {
        Ok(())
    }

    async fn get<T: DeserializeOwned + Send + Sync>(
        &self,
        _key: &str,
    ) -> Result<Option<T>, StoreError> {
        Ok(None)
    }

    async fn health_check(&self) -> Result<(), String> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> Result<(), StoreError> {
        Ok(())
    }
}
