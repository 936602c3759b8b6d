use crate::config::upstream::UpstreamConfig;
use crate::errors::ApiError;
use log::{debug, warn};
use serde_json::Value;
use thiserror::Error;

// Reexport modules
pub mod courses;
pub mod sessions;
pub mod users;

/// Errors surfaced by [`LmsClient`] operations
#[derive(Debug, Error)]
pub enum LmsError {
    /// The single generic kind raised when the transport fails during a
    /// resource call. Connection errors, timeouts and non-JSON bodies all
    /// collapse into it; upstream-reported error payloads that decode as
    /// JSON are returned as values instead.
    #[error("LMS request failed: {0}")]
    Request(String),
    /// Token issuance and validity probing bypass the generic wrapping and
    /// surface the transport error unwrapped.
    #[error(transparent)]
    Token(#[from] reqwest::Error),
}

impl From<LmsError> for ApiError {
    fn from(err: LmsError) -> Self {
        match err {
            LmsError::Request(detail) => {
                ApiError::bad_gateway(format!("LMS request failed: {}", detail))
            }
            LmsError::Token(e) => {
                ApiError::bad_gateway(format!("Failed to authenticate against the LMS: {}", e))
            }
        }
    }
}

/// Client for the upstream LMS platform.
///
/// Holds the OAuth2 client credentials and the bearer token cached after
/// the last successful authentication. The token is private to one client
/// instance; handlers construct a fresh client per request, so concurrent
/// requests run independent probe/authenticate sequences with no shared
/// token cache or locking.
///
/// There is no local expiry tracking: every resource call probes the
/// upstream `_ping` endpoint first and re-authenticates when the probe is
/// rejected, costing a second round trip per call.
pub struct LmsClient {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
    client_secret: String,
    token: Option<String>,
    token_data: Option<Value>,
}

impl LmsClient {
    pub fn new(config: &UpstreamConfig, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            token: None,
            token_data: None,
        }
    }

    /// URL of a resource path under the versioned API endpoint
    fn api_url(&self, path: &str) -> String {
        format!("{}/endpoint/v1/{}", self.base_url, path)
    }

    /// Performs the OAuth2 client-credentials token request and caches the
    /// response.
    ///
    /// A token response without an `access_token` field is not an error:
    /// the cached token stays empty, every later probe is rejected and the
    /// next call authenticates again.
    pub async fn authenticate(&mut self) -> Result<(), reqwest::Error> {
        let url = format!("{}/oauth/token/", self.base_url);
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];

        debug!("Requesting client-credentials token from {}", url);
        let response = self.http.post(&url).form(&params).send().await?;
        let result: Value = response.json().await?;

        self.token = result
            .get("access_token")
            .and_then(Value::as_str)
            .map(str::to_owned);
        if self.token.is_none() {
            warn!("Token response did not contain an access_token");
        }
        self.token_data = Some(result);
        Ok(())
    }

    /// Probes the upstream `_ping` endpoint with the current bearer token.
    /// This is the sole expiry-detection mechanism.
    pub async fn is_token_valid(&self) -> Result<bool, reqwest::Error> {
        let response = self
            .http
            .get(self.api_url("_ping"))
            .bearer_auth(self.token.as_deref().unwrap_or_default())
            .send()
            .await?;
        Ok(response.status().is_success())
    }

    /// Shared request path for every resource operation: probe token
    /// validity, re-authenticate unconditionally when the probe is
    /// rejected, then execute the request exactly once with whatever token
    /// is now cached. If authentication produced no working token the
    /// request still runs once and returns whatever the upstream sends
    /// back.
    async fn send_authorized<F>(&mut self, build: F) -> Result<Value, LmsError>
    where
        F: FnOnce(&reqwest::Client) -> reqwest::RequestBuilder,
    {
        if !self.is_token_valid().await? {
            debug!("Bearer token rejected by upstream, re-authenticating");
            self.authenticate().await?;
        }

        let response = build(&self.http)
            .bearer_auth(self.token.as_deref().unwrap_or_default())
            .send()
            .await
            .map_err(|e| LmsError::Request(e.to_string()))?;

        response
            .json()
            .await
            .map_err(|e| LmsError::Request(e.to_string()))
    }

    #[cfg(test)]
    pub(crate) fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[cfg(test)]
    pub(crate) fn token_data(&self) -> Option<&Value> {
        self.token_data.as_ref()
    }
}
