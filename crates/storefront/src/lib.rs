//! Atelier storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused.
//!
//! # Modules
//!
//! - [`catalog`] - Read-only artwork catalog and the shop filter pipeline
//! - [`cart`] - Cookie-backed cart persistence and mutation service
//! - [`routes`] - JSON HTTP API and the application router
//! - [`client`] - Cart API client and client-side view-model

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
