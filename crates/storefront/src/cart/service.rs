//! Cart mutation service.
//!
//! Each operation loads the cart from a [`CartStore`], applies one change,
//! and saves the full cart back. Nothing survives between calls except what
//! the store persists.

use atelier_core::{ArtworkId, CartError, CartSummary, CheckoutReceipt};
use serde_json::Value;
use thiserror::Error;
use tracing::instrument;

use super::{CartStore, CartStoreError};
use crate::catalog::Catalog;

/// Errors from cart operations.
#[derive(Debug, Error)]
pub enum CartServiceError {
    /// The artwork does not exist in the catalog.
    #[error("artwork {0} not found")]
    ArtworkNotFound(ArtworkId),

    /// A positive-quantity update named a line that is not in the cart.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The requested quantity is not a non-negative integer.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    /// The updated cart could not be persisted.
    #[error(transparent)]
    Store(#[from] CartStoreError),
}

/// Validate a requested quantity from a JSON body.
///
/// Accepts non-negative integers, including integral floats such as `2.0`.
///
/// # Errors
///
/// Returns `CartServiceError::InvalidQuantity` for anything else.
pub fn parse_quantity(value: &Value) -> Result<u32, CartServiceError> {
    let invalid = || CartServiceError::InvalidQuantity(value.to_string());
    let Value::Number(number) = value else {
        return Err(invalid());
    };

    if let Some(whole) = number.as_u64() {
        return u32::try_from(whole).map_err(|_| invalid());
    }

    match number.as_f64() {
        Some(float) if float.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&float) => {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // range checked above
            Ok(float as u32)
        }
        _ => Err(invalid()),
    }
}

/// Cart operations over an injected catalog.
#[derive(Debug, Clone)]
pub struct CartService {
    catalog: Catalog,
}

impl CartService {
    #[must_use]
    pub const fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// Current cart contents and total quantity.
    #[must_use]
    pub fn get(&self, store: &impl CartStore) -> CartSummary {
        store.load().summary()
    }

    /// Add one unit of an artwork.
    ///
    /// # Errors
    ///
    /// Returns `ArtworkNotFound` if the catalog has no such artwork, or
    /// `Store` if the cart cannot be saved.
    #[instrument(skip(self, store))]
    pub fn add_item(
        &self,
        store: &mut impl CartStore,
        id: &ArtworkId,
    ) -> Result<CartSummary, CartServiceError> {
        let artwork = self
            .catalog
            .get(id)
            .ok_or_else(|| CartServiceError::ArtworkNotFound(id.clone()))?;

        let mut cart = store.load();
        cart.add(artwork);
        store.save(&cart)?;

        tracing::info!(artwork_id = %id, total_items = cart.total_items(), "Added item to cart");
        Ok(cart.summary())
    }

    /// Set a line's quantity. Zero removes the line.
    ///
    /// # Errors
    ///
    /// Returns `Cart(LineNotFound)` if `quantity > 0` and the cart has no
    /// line for `id`; the stored cart is left untouched in that case.
    #[instrument(skip(self, store))]
    pub fn set_quantity(
        &self,
        store: &mut impl CartStore,
        id: &ArtworkId,
        quantity: u32,
    ) -> Result<CartSummary, CartServiceError> {
        let mut cart = store.load();
        cart.set_quantity(id, quantity)?;
        store.save(&cart)?;

        tracing::info!(artwork_id = %id, quantity, "Updated cart quantity");
        Ok(cart.summary())
    }

    /// Remove a line. Removing an absent line is not an error.
    ///
    /// # Errors
    ///
    /// Returns `Store` if the cart cannot be saved.
    #[instrument(skip(self, store))]
    pub fn remove_item(
        &self,
        store: &mut impl CartStore,
        id: &ArtworkId,
    ) -> Result<CartSummary, CartServiceError> {
        let mut cart = store.load();
        cart.remove(id);
        store.save(&cart)?;

        tracing::info!(artwork_id = %id, "Removed item from cart");
        Ok(cart.summary())
    }

    /// Clear the cart. No payment is taken.
    #[instrument(skip(self, store))]
    pub fn checkout(&self, store: &mut impl CartStore) -> CheckoutReceipt {
        let total_items = store.load().total_items();
        store.clear();
        tracing::info!(total_items, "Checkout completed, cart cleared");
        CheckoutReceipt::completed()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::cart::MemoryCartStore;
    use serde_json::json;

    fn service() -> CartService {
        CartService::new(Catalog::fixture())
    }

    fn id(value: &str) -> ArtworkId {
        ArtworkId::new(value)
    }

    #[test]
    fn test_add_then_zero_quantity_scenario() {
        let service = service();
        let mut store = MemoryCartStore::new();

        let first = service.add_item(&mut store, &id("1")).unwrap();
        assert_eq!(first.cart.len(), 1);
        assert_eq!(first.cart[0].quantity, 1);
        assert_eq!(first.total_items, 1);

        let second = service.add_item(&mut store, &id("1")).unwrap();
        assert_eq!(second.cart.len(), 1);
        assert_eq!(second.cart[0].quantity, 2);
        assert_eq!(second.total_items, 2);

        let cleared = service.set_quantity(&mut store, &id("1"), 0).unwrap();
        assert!(cleared.cart.is_empty());
        assert_eq!(cleared.total_items, 0);
    }

    #[test]
    fn test_add_n_times_yields_quantity_n() {
        let service = service();
        let mut store = MemoryCartStore::new();
        for _ in 0..5 {
            service.add_item(&mut store, &id("4")).unwrap();
        }
        let summary = service.get(&store);
        assert_eq!(summary.cart.len(), 1);
        assert_eq!(summary.cart[0].quantity, 5);
    }

    #[test]
    fn test_add_unknown_artwork_fails_without_writing() {
        let service = service();
        let mut store = MemoryCartStore::new();
        service.add_item(&mut store, &id("2")).unwrap();

        let err = service.add_item(&mut store, &id("99")).unwrap_err();
        assert!(matches!(err, CartServiceError::ArtworkNotFound(ref missing) if missing.as_str() == "99"));
        assert_eq!(service.get(&store).total_items, 1);
    }

    #[test]
    fn test_set_quantity_on_missing_line_is_not_found() {
        let service = service();
        let mut store = MemoryCartStore::new();
        let err = service.set_quantity(&mut store, &id("99"), 3).unwrap_err();
        assert!(matches!(err, CartServiceError::Cart(CartError::LineNotFound(_))));
        assert!(service.get(&store).cart.is_empty());
    }

    #[test]
    fn test_total_items_is_sum_of_quantities() {
        let service = service();
        let mut store = MemoryCartStore::new();
        service.add_item(&mut store, &id("1")).unwrap();
        service.add_item(&mut store, &id("2")).unwrap();
        let summary = service.set_quantity(&mut store, &id("2"), 4).unwrap();
        assert_eq!(summary.cart.len(), 2);
        assert_eq!(summary.total_items, 5);
    }

    #[test]
    fn test_remove_absent_item_is_noop() {
        let service = service();
        let mut store = MemoryCartStore::new();
        service.add_item(&mut store, &id("3")).unwrap();
        let summary = service.remove_item(&mut store, &id("1")).unwrap();
        assert_eq!(summary.total_items, 1);
    }

    #[test]
    fn test_checkout_clears_cart() {
        let service = service();
        let mut store = MemoryCartStore::new();
        service.add_item(&mut store, &id("1")).unwrap();
        let receipt = service.checkout(&mut store);
        assert!(receipt.success);
        assert!(service.get(&store).cart.is_empty());
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity(&json!(0)).unwrap(), 0);
        assert_eq!(parse_quantity(&json!(3)).unwrap(), 3);
        assert_eq!(parse_quantity(&json!(2.0)).unwrap(), 2);

        for bad in [json!(-1), json!(1.5), json!("2"), json!(null), json!(-0.5), json!(1e12)] {
            assert!(
                matches!(parse_quantity(&bad), Err(CartServiceError::InvalidQuantity(_))),
                "{bad} should be rejected"
            );
        }
    }
}
