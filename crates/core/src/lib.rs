//! Atelier Core - Shared types library.
//!
//! This crate provides the domain types used across Atelier components:
//! - `storefront` - The catalog and cart HTTP service
//! - the cart view-model, which talks to the storefront over HTTP
//!
//! # Architecture
//!
//! The core crate contains only types and pure operations on them - no I/O,
//! no cookies, no HTTP clients. Every cart mutation rule lives here so the
//! server and its tests agree on a single definition.
//!
//! # Modules
//!
//! - [`types`] - Artwork records, prices, identifiers, and the cart aggregate

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
