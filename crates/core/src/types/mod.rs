//! Core types for Atelier.
//!
//! This module provides type-safe wrappers for the storefront's domain.

pub mod artwork;
pub mod cart;
pub mod id;
pub mod price;

pub use artwork::Artwork;
pub use cart::{Cart, CartError, CartLineItem, CartSummary, CheckoutReceipt};
pub use id::*;
pub use price::Price;
