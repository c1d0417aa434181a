//! Common test utilities for API testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! over a fixture catalog, with a mock catalog source injected for refresh
//! tests, so no network or real catalog file is needed.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use cardshelf_core::{
    config::{CatalogConfig, ServerConfig},
    testing::MockCatalogSource,
    CatalogDocument, CatalogRecord, CatalogSource, Config,
};
use cardshelf_server::{create_router, AppState, CatalogSnapshot};

/// Re-export fixtures for test convenience
pub use cardshelf_core::testing::fixtures;

/// Test fixture for API testing with a mock catalog source.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_products() {
///     let fixture = TestFixture::new().await;
///
///     let response = fixture.get("/api/v1/products?sort=price").await;
///
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Shared state behind the router
    pub state: Arc<AppState>,
    /// Mock source used by catalog refreshes, if enabled
    pub source: Option<MockCatalogSource>,
    /// Temporary directory holding the catalog file and web UI
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Body parsed as JSON, or `Null` if it was not JSON
    pub body: Value,
    pub text: String,
}

impl TestFixture {
    /// Create a fixture serving the sample catalog with a mock source.
    pub async fn new() -> Self {
        Self::with_config(TestConfig::default()).await
    }

    /// Create a test fixture with custom configuration.
    pub async fn with_config(test_config: TestConfig) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let web_dir = temp_dir.path().join("web");
        std::fs::create_dir_all(&web_dir).expect("Failed to create web dir");
        std::fs::write(web_dir.join("index.html"), "<h1>cardshelf</h1>")
            .expect("Failed to write index.html");

        let config = Config {
            catalog: CatalogConfig {
                path: temp_dir.path().join("data").join("catalog.json"),
            },
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 8000, // Not used for in-process testing
                web_dir,
            },
            ..Default::default()
        };

        let source = test_config
            .with_source
            .then(|| MockCatalogSource::with_records(fixtures::sample_catalog()));

        let catalog = CatalogSnapshot::new(
            CatalogDocument::from_records(test_config.records),
            "fixture",
        );
        let state = Arc::new(AppState::new(
            config,
            catalog,
            source
                .clone()
                .map(|s| Arc::new(s) as Arc<dyn CatalogSource>),
        ));

        let router = create_router(Arc::clone(&state));

        Self {
            router,
            state,
            source,
            temp_dir,
        }
    }

    /// Where refreshes save the catalog.
    pub fn catalog_path(&self) -> PathBuf {
        self.state.config().catalog.path.clone()
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path).await
    }

    /// Send a POST request without a body.
    pub async fn post(&self, path: &str) -> TestResponse {
        self.request("POST", path).await
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).into_owned();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            body,
            text,
        }
    }
}

/// Configuration for test fixture.
#[derive(Debug, Clone)]
pub struct TestConfig {
    /// Records served at startup
    pub records: Vec<CatalogRecord>,
    /// Configure a mock source for refreshes
    pub with_source: bool,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            records: fixtures::sample_catalog(),
            with_source: true,
        }
    }
}

impl TestConfig {
    /// Start from an empty catalog.
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            ..Default::default()
        }
    }

    /// No catalog source, so refreshes are unavailable.
    pub fn without_source() -> Self {
        Self {
            with_source: false,
            ..Default::default()
        }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            $response.text
        );
    };
}
