//! Cart route handlers.
//!
//! Every handler rebuilds the cart from the request's `art-cart` cookie,
//! applies one operation through [`CartService`](crate::cart::CartService),
//! and, for mutations, sends the rewritten cookie back with the response.

use atelier_core::{ArtworkId, CartSummary, CheckoutReceipt};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::HeaderMap,
};
use serde_json::Value;
use tracing::instrument;

use crate::cart::{CookieCartStore, parse_quantity};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;

/// Current cart contents.
#[instrument(skip(state, headers))]
pub async fn show(State(state): State<AppState>, headers: HeaderMap) -> Json<CartSummary> {
    let store = state.cart_store(&headers);
    Json(state.cart_service().get(&store))
}

/// Add one unit of an artwork. Body: `{ "id": "<artwork id>" }`.
#[instrument(skip(state, headers, body))]
pub async fn add(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<(CookieCartStore, Json<CartSummary>)> {
    let Json(body) = body?;
    let id = match body.get("id") {
        Some(Value::String(id)) if !id.is_empty() => ArtworkId::new(id.as_str()),
        _ => return Err(AppError::BadRequest("Item ID is required".to_string())),
    };

    let mut store = state.cart_store(&headers);
    let summary = state.cart_service().add_item(&mut store, &id)?;
    add_breadcrumb("cart", "Added artwork", Some(&[("artwork_id", id.as_str())]));

    Ok((store, Json(summary)))
}

/// Set the quantity of a cart line. Body: `{ "quantity": <n> }`.
///
/// A quantity of 0 removes the line.
#[instrument(skip(state, headers, body))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<(CookieCartStore, Json<CartSummary>)> {
    let Json(body) = body?;
    let quantity = parse_quantity(body.get("quantity").unwrap_or(&Value::Null))?;
    let id = ArtworkId::new(id);

    let mut store = state.cart_store(&headers);
    let summary = state
        .cart_service()
        .set_quantity(&mut store, &id, quantity)?;

    Ok((store, Json(summary)))
}

/// Remove a cart line. Removing an absent line still succeeds.
#[instrument(skip(state, headers))]
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<(CookieCartStore, Json<CartSummary>)> {
    let id = ArtworkId::new(id);
    let mut store = state.cart_store(&headers);
    let summary = state.cart_service().remove_item(&mut store, &id)?;
    add_breadcrumb("cart", "Removed artwork", Some(&[("artwork_id", id.as_str())]));

    Ok((store, Json(summary)))
}

/// Clear the cart. There is no payment step.
#[instrument(skip(state, headers))]
pub async fn checkout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> (CookieCartStore, Json<CheckoutReceipt>) {
    let mut store = state.cart_store(&headers);
    let receipt = state.cart_service().checkout(&mut store);
    add_breadcrumb("cart", "Checked out", None);

    (store, Json(receipt))
}
