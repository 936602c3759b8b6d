use crate::config::GatewayConfig;
use crate::store::{create_store, Store, StoreBackend};
use crate::upstream::LmsClient;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub store: Arc<Store>,
    pub http_client: Client,
}

impl AppState {
    fn build_http_client(timeout: u64) -> Client {
        // One shared connection pool for all upstream calls; bearer tokens
        // are attached per request because each inbound request owns its
        // own token lifecycle.
        Client::builder()
            .timeout(Duration::from_secs(timeout))
            .connect_timeout(Duration::from_secs(2))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Some(Duration::from_secs(90)))
            .build()
            .expect("Failed to create LMS HTTP client")
    }

    pub async fn new(config: GatewayConfig) -> Result<Self, std::io::Error> {
        let store = create_store(&config).await.map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Failed to create mirror store: {}", e),
            )
        })?;
        Ok(Self {
            http_client: AppState::build_http_client(config.upstream.timeout),
            store: Arc::new(store),
            config: Arc::new(config),
        })
    }

    /// Builds a fresh upstream client for one inbound request.
    ///
    /// Token state is private to the returned instance, so concurrent
    /// requests authenticate independently; only the connection pool is
    /// shared.
    pub fn lms_client(&self) -> LmsClient {
        LmsClient::new(&self.config.upstream, self.http_client.clone())
    }

    /// Check if all components are healthy
    pub async fn health_check(&self) -> bool {
        self.store.health_check().await.is_ok()
    }
}
