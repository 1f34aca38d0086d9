//! The shopping cart aggregate.
//!
//! A [`Cart`] is an ordered list of [`CartLineItem`]s with at most one line
//! per artwork. New lines are appended; quantity changes happen in place so
//! the display order never shifts under the shopper.
//!
//! Quantities stored in a cart are always positive. Zero is only ever a
//! request to remove a line, never a stored state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::artwork::Artwork;
use super::id::ArtworkId;
use super::price::Price;

/// Errors from cart mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// No line for this artwork is present in the cart.
    #[error("item {0} not found in cart")]
    LineNotFound(ArtworkId),
}

/// One artwork in the cart, with every artwork field flattened alongside
/// the quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    #[serde(flatten)]
    pub artwork: Artwork,
    pub quantity: u32,
}

impl CartLineItem {
    #[must_use]
    pub const fn id(&self) -> &ArtworkId {
        &self.artwork.id
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.artwork.price.times(self.quantity)
    }
}

/// An ordered collection of line items.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from stored line items, rejecting states a cart can
    /// never be in: zero quantities or two lines for the same artwork.
    ///
    /// Returns `None` for an invalid list.
    #[must_use]
    pub fn from_stored(items: Vec<CartLineItem>) -> Option<Self> {
        let mut seen = std::collections::HashSet::with_capacity(items.len());
        let valid = items
            .iter()
            .all(|item| item.quantity > 0 && seen.insert(item.id().clone()));
        valid.then_some(Self { items })
    }

    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    #[must_use]
    pub fn into_items(self) -> Vec<CartLineItem> {
        self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all quantities (not the number of distinct lines).
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |sum, item| sum.saturating_add(item.quantity))
    }

    /// Sum of price times quantity over every line.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Add one unit of `artwork`.
    ///
    /// Increments the existing line if there is one, otherwise appends a new
    /// line with quantity 1.
    pub fn add(&mut self, artwork: &Artwork) {
        if let Some(line) = self.items.iter_mut().find(|item| item.id() == &artwork.id) {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.items.push(CartLineItem {
                artwork: artwork.clone(),
                quantity: 1,
            });
        }
    }

    /// Set the quantity of an existing line.
    ///
    /// A quantity of 0 removes the line (a no-op if it is absent). A positive
    /// quantity replaces the line's quantity in place.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if `quantity > 0` and there is no
    /// line for `id`.
    pub fn set_quantity(&mut self, id: &ArtworkId, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            self.remove(id);
            return Ok(());
        }

        let line = self
            .items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or_else(|| CartError::LineNotFound(id.clone()))?;
        line.quantity = quantity;
        Ok(())
    }

    /// Remove the line for `id`. Absent lines are ignored.
    pub fn remove(&mut self, id: &ArtworkId) {
        self.items.retain(|item| item.id() != id);
    }

    /// Snapshot of the cart as returned by every cart endpoint.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary {
            total_items: self.total_items(),
            cart: self.items.clone(),
        }
    }
}

/// Cart contents plus the total quantity, as sent over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub cart: Vec<CartLineItem>,
    pub total_items: u32,
}

/// Acknowledgement returned by checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutReceipt {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckoutReceipt {
    #[must_use]
    pub fn completed() -> Self {
        Self {
            success: true,
            message: Some("Checkout successful".to_string()),
        }
    }
}
