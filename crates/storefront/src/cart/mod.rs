//! Cart persistence and mutation.
//!
//! The browser owns the cart. Each request rebuilds it from the `art-cart`
//! cookie, applies exactly one mutation, and writes the whole cart back.
//! There is no server-side copy and no locking; concurrent writes from the
//! same browser are last-write-wins.
//!
//! # Layers
//!
//! - [`CartStore`] - where a request's cart is loaded from and saved to
//! - [`CookieCartCodec`] / [`CookieCartStore`] - the cookie-backed store
//! - [`MemoryCartStore`] - a plain in-memory store
//! - [`CartService`] - add / set quantity / remove / checkout over any store

mod codec;
mod service;

use atelier_core::Cart;
use thiserror::Error;

pub use codec::{CART_COOKIE_MAX_AGE_DAYS, CART_COOKIE_NAME, CookieCartCodec, CookieCartStore};
pub use service::{CartService, CartServiceError, parse_quantity};

/// Errors persisting a cart.
#[derive(Debug, Error)]
pub enum CartStoreError {
    #[error("failed to encode cart: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("cart signing secret must be at least 32 bytes (got {0})")]
    SigningSecretTooShort(usize),
}

/// Request-scoped cart persistence.
///
/// `load` never fails: missing or unreadable state is an empty cart.
pub trait CartStore {
    /// Current cart state.
    fn load(&self) -> Cart;

    /// Replace the stored cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be encoded.
    fn save(&mut self, cart: &Cart) -> Result<(), CartStoreError>;

    /// Drop the stored cart entirely.
    fn clear(&mut self);
}

/// In-memory cart store.
#[derive(Debug, Clone, Default)]
pub struct MemoryCartStore {
    cart: Cart,
}

impl MemoryCartStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStore for MemoryCartStore {
    fn load(&self) -> Cart {
        self.cart.clone()
    }

    fn save(&mut self, cart: &Cart) -> Result<(), CartStoreError> {
        self.cart = cart.clone();
        Ok(())
    }

    fn clear(&mut self) {
        self.cart = Cart::new();
    }
}
