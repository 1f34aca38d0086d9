//! Cart API client and view-model.
//!
//! The server is the only authority on cart contents. [`CartViewModel`]
//! mirrors it by replacing its local copy with whatever the server returns,
//! and [`HttpCartApi`] carries the `art-cart` cookie between calls the way a
//! browser would.

mod view_model;

pub use view_model::{CART_ERROR_MESSAGE, CartViewModel};

use std::future::Future;

use atelier_core::{ArtworkId, CartSummary, CheckoutReceipt};
use reqwest::RequestBuilder;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;
use url::Url;

/// Errors that can occur when talking to the cart API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The server returned a cart no cart can be in (zero quantities or
    /// repeated lines).
    #[error("Invalid cart in response")]
    InvalidCart,

    /// The base URL cannot have path segments appended.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

/// One method per cart endpoint.
pub trait CartApi {
    /// `GET /cart`
    fn fetch_cart(&self) -> impl Future<Output = Result<CartSummary, ClientError>> + Send;

    /// `POST /cart`
    fn add_item(
        &self,
        id: &ArtworkId,
    ) -> impl Future<Output = Result<CartSummary, ClientError>> + Send;

    /// `PUT /cart/{id}`
    fn update_quantity(
        &self,
        id: &ArtworkId,
        quantity: u32,
    ) -> impl Future<Output = Result<CartSummary, ClientError>> + Send;

    /// `DELETE /cart/{id}`
    fn remove_item(
        &self,
        id: &ArtworkId,
    ) -> impl Future<Output = Result<CartSummary, ClientError>> + Send;

    /// `POST /cart/checkout`
    fn checkout(&self) -> impl Future<Output = Result<CheckoutReceipt, ClientError>> + Send;
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: String,
}

/// Cart API over HTTP with a cookie jar.
#[derive(Debug, Clone)]
pub struct HttpCartApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpCartApi {
    /// Create a client for the storefront at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` cannot be a base or the HTTP client
    /// fails to build.
    pub fn new(base_url: Url) -> Result<Self, ClientError> {
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }

        let client = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response
                .json::<ApiErrorBody>()
                .await
                .map_or_else(|_| status.to_string(), |body| body.error);
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

impl CartApi for HttpCartApi {
    async fn fetch_cart(&self) -> Result<CartSummary, ClientError> {
        let url = self.endpoint(&["cart"])?;
        Self::send(self.client.get(url)).await
    }

    async fn add_item(&self, id: &ArtworkId) -> Result<CartSummary, ClientError> {
        let url = self.endpoint(&["cart"])?;
        Self::send(self.client.post(url).json(&json!({ "id": id }))).await
    }

    async fn update_quantity(&self, id: &ArtworkId, quantity: u32) -> Result<CartSummary, ClientError> {
        let url = self.endpoint(&["cart", id.as_str()])?;
        Self::send(self.client.put(url).json(&json!({ "quantity": quantity }))).await
    }

    async fn remove_item(&self, id: &ArtworkId) -> Result<CartSummary, ClientError> {
        let url = self.endpoint(&["cart", id.as_str()])?;
        Self::send(self.client.delete(url)).await
    }

    async fn checkout(&self) -> Result<CheckoutReceipt, ClientError> {
        let url = self.endpoint(&["cart", "checkout"])?;
        Self::send(self.client.post(url)).await
    }
}
