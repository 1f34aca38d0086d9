//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health               - Liveness check
//!
//! # Catalog
//! GET    /artworks             - Shop listing (q, medium, min_price, max_price, sort, page)
//! GET    /artworks/featured    - Featured works
//! GET    /artworks/{id}        - Artwork detail
//! GET    /categories           - Browse categories with counts
//!
//! # Cart (JSON, state in the `art-cart` cookie)
//! GET    /cart                 - Current cart + totalItems
//! POST   /cart                 - Add one unit ({ "id": ... })
//! PUT    /cart/{id}            - Set quantity ({ "quantity": ... }), 0 removes
//! DELETE /cart/{id}            - Remove line (idempotent)
//! POST   /cart/checkout        - Clear the cart
//! ```

pub mod artworks;
pub mod cart;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::error::panic_response;
use crate::middleware::{request_id_middleware, security_headers_middleware};
use crate::state::AppState;

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/artworks", get(artworks::index))
        .route("/artworks/featured", get(artworks::featured))
        .route("/artworks/{id}", get(artworks::show))
        .route("/categories", get(artworks::categories))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/cart", get(cart::show).post(cart::add))
        .route("/cart/checkout", post(cart::checkout))
        .route("/cart/{id}", axum::routing::put(cart::update).delete(cart::remove))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .merge(catalog_routes())
        .merge(cart_routes())
}

/// Build the full application: routes, state, and the middleware stack.
///
/// Sentry layers are added by the binary on top of this.
pub fn app(state: AppState) -> Router {
    routes()
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::extract::Request| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
