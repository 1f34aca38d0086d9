//! Application state shared across handlers.

use std::sync::Arc;

use axum::http::HeaderMap;
use secrecy::ExposeSecret;

use crate::cart::{CartService, CartStoreError, CookieCartCodec, CookieCartStore};
use crate::catalog::{Catalog, CatalogError};
use crate::config::StorefrontConfig;

/// Error building application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("cart cookie error: {0}")]
    CartCookie(#[from] CartStoreError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Nothing in it is mutable: the
/// catalog is fixed at startup and carts live in the browser.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    cart_codec: CookieCartCodec,
    cart_service: CartService,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Loads the catalog from `config.catalog_path` when set, otherwise uses
    /// the built-in fixture.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog file is invalid or the cart signing
    /// secret is unusable.
    pub fn new(config: StorefrontConfig) -> Result<Self, StateError> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::load(path)?,
            None => Catalog::fixture(),
        };
        Self::with_catalog(config, catalog)
    }

    /// Create application state around an already-built catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart signing secret is unusable.
    pub fn with_catalog(config: StorefrontConfig, catalog: Catalog) -> Result<Self, StateError> {
        let mut cart_codec = CookieCartCodec::new(config.secure_cookies());
        if let Some(secret) = &config.cart_secret {
            cart_codec = cart_codec.with_signing_secret(secret.expose_secret().as_bytes())?;
        }
        let cart_service = CartService::new(catalog.clone());

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart_codec,
                cart_service,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the artwork catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the cart mutation service.
    #[must_use]
    pub fn cart_service(&self) -> &CartService {
        &self.inner.cart_service
    }

    /// Open the cart carried by a request's cookies.
    #[must_use]
    pub fn cart_store(&self, headers: &HeaderMap) -> CookieCartStore {
        self.inner.cart_codec.store(headers)
    }
}
