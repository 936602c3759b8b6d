use crate::config::GatewayConfig;
use crate::create_app;
use crate::state::AppState;
use axum::body::Body;
use axum::Router;
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use log::LevelFilter;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tower::ServiceExt;
use wiremock::matchers;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Test fixture for exercising API endpoints against a mocked LMS.
///
/// Starts a wiremock server standing in for the upstream platform, builds
/// the application with a config pointing at it and an in-memory mirror
/// store, and provides request helpers.
///
/// ```rust
/// #[tokio::test]
/// async fn test_endpoint() {
///     let fixture = TestFixture::new().await;
///     fixture.mock_valid_token().await;
///
///     Mock::given(matchers::method("GET"))
///         .and(matchers::path("/endpoint/v1/courses/"))
///         .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
///         .mount(&fixture.upstream_mock)
///         .await;
///
///     let response = fixture.get("/courses").await;
///     response.assert_ok();
/// }
/// ```
pub struct TestFixture {
    /// The application router
    pub app: Router,
    /// Configuration used to build the application
    pub config: GatewayConfig,
    /// Application state, exposed so tests can inspect the mirror store
    pub state: AppState,
    /// Mock server standing in for the upstream LMS
    pub upstream_mock: MockServer,
}

impl TestFixture {
    pub async fn new() -> Self {
        // Initialize test logger
        let _ = env_logger::builder()
            .filter_level(LevelFilter::Debug)
            .is_test(true)
            .try_init();

        let upstream_mock = MockServer::start().await;
        let config = GatewayConfig::for_test_with_mocks(&upstream_mock);
        let state = AppState::new(config.clone())
            .await
            .expect("Failed to initialize test state");
        let app = create_app(state.clone()).await;

        Self {
            app,
            config,
            state,
            upstream_mock,
        }
    }

    /// Makes the upstream accept whatever bearer token the client probes
    /// with, so resource calls proceed without a token request.
    pub async fn mock_valid_token(&self) {
        Mock::given(matchers::method("GET"))
            .and(matchers::path("/endpoint/v1/_ping"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&self.upstream_mock)
            .await;
    }

    /// Creates a request builder with a JSON content type preconfigured.
    pub fn request_builder(&self, method: Method, uri: impl AsRef<str>) -> http::request::Builder {
        Request::builder()
            .method(method)
            .uri(uri.as_ref())
            .header("Content-Type", "application/json")
    }

    /// Sends a GET request to the specified URI.
    pub async fn get(&self, uri: impl AsRef<str>) -> TestResponse {
        let request = self
            .request_builder(Method::GET, uri)
            .body(Body::empty())
            .expect("Failed to build request");

        self.send(request).await
    }

    /// Sends a POST request with a JSON body to the specified URI.
    pub async fn post<T: Serialize>(&self, uri: impl AsRef<str>, body: &T) -> TestResponse {
        let json_body = serde_json::to_vec(body).expect("Failed to serialize body to JSON");
        let request = self
            .request_builder(Method::POST, uri)
            .body(Body::from(json_body))
            .expect("Failed to build request");

        self.send(request).await
    }

    /// Sends a request through the router and collects the response.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        // Try to parse as JSON, defaulting to an empty object on an empty
        // or non-JSON body
        let json = if !body.is_empty() {
            serde_json::from_slice(&body).unwrap_or_else(|_| serde_json::json!({}))
        } else {
            serde_json::json!({})
        };

        TestResponse { status, json }
    }
}

/// Response from a test request with convenient access to status and body.
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response body as JSON (if present and valid JSON)
    pub json: Value,
}

impl TestResponse {
    /// Asserts that the response has the expected status code.
    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status,
            expected,
            "Expected status {} but got {} with body: {}",
            expected,
            self.status,
            serde_json::to_string_pretty(&self.json).unwrap_or_default()
        );
        self
    }

    /// Asserts that the response status is OK (200).
    pub fn assert_ok(&self) -> &Self {
        self.assert_status(StatusCode::OK)
    }

    /// Converts the response body to the specified type.
    #[allow(dead_code)]
    pub fn json_as<T: DeserializeOwned>(&self) -> T {
        serde_json::from_value(self.json.clone()).expect("Failed to deserialize response JSON")
    }
}
