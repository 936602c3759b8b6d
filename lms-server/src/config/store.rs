use serde::Deserialize;

/// Specifies which mirror store backend to use
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StoreBackendKind {
    InMemory,
    Redis,
    #[serde(other)]
    #[default]
    None,
}

/// Configuration for the local mirror of upstream records
#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// Mirror record TTL in seconds (default: 1 hour)
    #[serde(default)]
    pub ttl: u32,

    /// Store backend: "in-memory", "redis", or none (default)
    #[serde(default)]
    pub backend: StoreBackendKind,

    /// In-memory store specific configuration
    #[serde(default)]
    pub memory: InMemoryStoreConfig,

    /// Redis store specific configuration
    #[serde(default)]
    pub redis: RedisStoreConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            ttl: 3600, // 1 hour
            backend: StoreBackendKind::None,
            memory: InMemoryStoreConfig::default(),
            redis: RedisStoreConfig::default(),
        }
    }
}

/// In-memory store configuration options
#[derive(Debug, Deserialize, Clone)]
pub struct InMemoryStoreConfig {
    /// Maximum capacity in MiB (default: 128 MiB)
    #[serde(default)]
    pub capacity: usize,
}

impl Default for InMemoryStoreConfig {
    fn default() -> Self {
        Self {
            capacity: 128, // 128 MiB
        }
    }
}

/// Redis store configuration options
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RedisStoreConfig {
    /// Redis connection string
    #[serde(default)]
    pub url: String,
}
