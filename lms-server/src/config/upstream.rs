use serde::Deserialize;
use url::Url;

/// Configuration for the upstream LMS platform
#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    /// Base URL of the LMS API (e.g. https://go.lms.example)
    #[serde(default)]
    pub base_url: String,

    /// OAuth2 client id for the client-credentials grant
    #[serde(default)]
    pub client_id: String,

    /// OAuth2 client secret for the client-credentials grant
    #[serde(default)]
    pub client_secret: String,

    /// Request timeout for LMS calls in seconds (default: 30)
    #[serde(default)]
    pub timeout: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            client_id: String::new(),
            client_secret: String::new(),
            timeout: 30,
        }
    }
}

impl UpstreamConfig {
    /// Validates that the required connection settings are present and the
    /// base URL is well-formed. Missing credentials are a startup failure,
    /// not a per-request concern.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("LMS base URL is required (LMS_UPSTREAM__BASE_URL)".to_string());
        }
        Url::parse(&self.base_url).map_err(|e| format!("Invalid LMS base URL: {}", e))?;
        if self.client_id.is_empty() {
            return Err("LMS client id is required (LMS_UPSTREAM__CLIENT_ID)".to_string());
        }
        if self.client_secret.is_empty() {
            return Err("LMS client secret is required (LMS_UPSTREAM__CLIENT_SECRET)".to_string());
        }
        Ok(())
    }
}
