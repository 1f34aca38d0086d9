//! Integration tests for Atelier.
//!
//! Each test boots the real storefront router on an ephemeral port and
//! drives it over HTTP with a cookie-aware client, so the `art-cart` cookie
//! round-trips exactly as it would in a browser.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p atelier-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_api` - Cart endpoints and cookie behavior
//! - `catalog_api` - Listing, detail, featured, and categories
//! - `cart_view_model` - Client view-model against the live server

use std::net::SocketAddr;

use atelier_storefront::config::StorefrontConfig;
use atelier_storefront::routes;
use atelier_storefront::state::{AppState, StateError};
use thiserror::Error;
use tokio::task::JoinHandle;
use url::Url;

/// Errors starting a test server.
#[derive(Debug, Error)]
pub enum SpawnError {
    #[error("failed to bind test listener: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to build application state: {0}")]
    State(#[from] StateError),
    #[error("invalid server URL: {0}")]
    Url(#[from] url::ParseError),
}

/// A storefront running in the background for the duration of a test.
///
/// The server task is aborted when this is dropped.
pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a storefront with the default (development) configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot bind or state fails to build.
    pub async fn spawn() -> Result<Self, SpawnError> {
        Self::spawn_with(StorefrontConfig::default()).await
    }

    /// Start a storefront with a custom configuration.
    ///
    /// The configured host and port are ignored; the server always binds an
    /// ephemeral port on loopback.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot bind or state fails to build.
    pub async fn spawn_with(config: StorefrontConfig) -> Result<Self, SpawnError> {
        let app = routes::app(AppState::new(config)?);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                report_server_error(&err);
            }
        });

        Ok(Self { addr, handle })
    }

    /// Base URL of the running server, e.g. `http://127.0.0.1:54321/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the address does not form a valid URL.
    pub fn base_url(&self) -> Result<Url, SpawnError> {
        Ok(Url::parse(&format!("http://{}/", self.addr))?)
    }

    /// Absolute URL for `path` (which should start with `/`).
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[allow(clippy::print_stderr)]
fn report_server_error(err: &std::io::Error) {
    eprintln!("test server stopped: {err}");
}

/// A client that keeps cookies between requests, like a browser.
///
/// # Errors
///
/// Returns an error if the HTTP client fails to build.
pub fn browser() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().cookie_store(true).build()
}
