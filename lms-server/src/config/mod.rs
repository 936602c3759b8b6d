pub(crate) use crate::config::store::{StoreBackendKind, StoreConfig};
use crate::config::upstream::UpstreamConfig;
use config::{Config as ConfigCrate, ConfigError};
use serde::Deserialize;

pub mod store;
pub mod upstream;

/// Main configuration structure for the LMS gateway
#[derive(Debug, Deserialize, Clone)]
pub struct GatewayConfig {
    /// The port the gateway will listen on (default: 8080)
    #[serde(default)]
    pub port: u16,

    /// Upstream LMS connection settings
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Mirror store configuration
    #[serde(default)]
    pub store: StoreConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            upstream: UpstreamConfig::default(),
            store: StoreConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Creates a new configuration from `LMS_`-prefixed environment
    /// variables. Nested keys use a double-underscore separator, e.g.
    /// `LMS_UPSTREAM__BASE_URL` maps to `upstream.base_url`.
    pub fn new() -> Result<Self, String> {
        let config: Self = ConfigCrate::builder()
            .add_source(
                config::Environment::with_prefix("LMS")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e: ConfigError| e.to_string())?
            .try_deserialize()
            .map_err(|e: ConfigError| e.to_string())?;
        config.upstream.validate()?;
        Ok(config)
    }

    #[cfg(test)]
    pub fn for_test_with_mocks(upstream_mock: &wiremock::MockServer) -> Self {
        Self {
            port: 0, // Let the OS choose a port
            upstream: UpstreamConfig {
                base_url: upstream_mock.uri(),
                client_id: "test_client_id".to_string(),
                client_secret: "test_client_secret".to_string(),
                timeout: 5,
            },
            store: StoreConfig {
                ttl: 60,
                backend: StoreBackendKind::InMemory,
                ..Default::default()
            },
        }
    }
}
