//! Client-side mirror of the server cart.

use atelier_core::{ArtworkId, Cart, CartLineItem, CartSummary, Price};

use super::{CartApi, ClientError};

/// Message shown when any cart request fails.
pub const CART_ERROR_MESSAGE: &str = "Something went wrong with your cart. Please try again.";

/// Local view of the cart, kept in sync with the server.
///
/// Every mutation goes to the server and the local items are replaced with
/// the cart it returns; nothing is computed locally. A failed call sets
/// [`error`](Self::error) and leaves the last good items in place.
#[derive(Debug)]
pub struct CartViewModel<A> {
    api: A,
    cart: Cart,
    loading: bool,
    error: Option<String>,
}

impl<A: CartApi> CartViewModel<A> {
    /// Create an empty view-model. Call [`init`](Self::init) to load.
    #[must_use]
    pub const fn new(api: A) -> Self {
        Self {
            api,
            cart: Cart::new(),
            loading: false,
            error: None,
        }
    }

    /// Create a view-model and fetch the current cart.
    ///
    /// A failed fetch leaves an empty cart with [`error`](Self::error) set.
    pub async fn init(api: A) -> Self {
        let mut view_model = Self::new(api);
        // Failure is recorded in `error`.
        let _ = view_model.refresh().await;
        view_model
    }

    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        self.cart.items()
    }

    #[must_use]
    pub const fn loading(&self) -> bool {
        self.loading
    }

    /// Error from the most recent call, cleared by the next success.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Sum of price times quantity over all lines.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.cart.total_price()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.cart.total_items()
    }

    /// Replace the local items with the server's cart.
    ///
    /// # Errors
    ///
    /// Returns the request error; local items are kept.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        self.loading = true;
        let result = self.api.fetch_cart().await;
        self.settle(result)
    }

    /// Add one unit of an artwork.
    ///
    /// # Errors
    ///
    /// Returns the request error; local items are kept.
    pub async fn add(&mut self, id: &ArtworkId) -> Result<(), ClientError> {
        self.loading = true;
        let result = self.api.add_item(id).await;
        self.settle(result)
    }

    /// Set a line's quantity. Zero removes the line.
    ///
    /// # Errors
    ///
    /// Returns the request error; local items are kept.
    pub async fn update_quantity(&mut self, id: &ArtworkId, quantity: u32) -> Result<(), ClientError> {
        self.loading = true;
        let result = self.api.update_quantity(id, quantity).await;
        self.settle(result)
    }

    /// Remove a line.
    ///
    /// # Errors
    ///
    /// Returns the request error; local items are kept.
    pub async fn remove(&mut self, id: &ArtworkId) -> Result<(), ClientError> {
        self.loading = true;
        let result = self.api.remove_item(id).await;
        self.settle(result)
    }

    /// Check out, then refetch the (now empty) cart.
    ///
    /// # Errors
    ///
    /// Returns the checkout or refetch error; local items are kept.
    pub async fn checkout(&mut self) -> Result<(), ClientError> {
        self.loading = true;
        if let Err(err) = self.api.checkout().await {
            return self.settle(Err(err));
        }
        self.refresh().await
    }

    fn settle(&mut self, result: Result<CartSummary, ClientError>) -> Result<(), ClientError> {
        self.loading = false;
        let result = result.and_then(|summary| {
            Cart::from_stored(summary.cart).ok_or(ClientError::InvalidCart)
        });
        match result {
            Ok(cart) => {
                self.cart = cart;
                self.error = None;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "Cart request failed");
                self.error = Some(CART_ERROR_MESSAGE.to_string());
                Err(err)
            }
        }
    }
}
