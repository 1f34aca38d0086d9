//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, added in `main`)
//! 2. `CatchPanicLayer` (turn panics into JSON 500s)
//! 3. `TraceLayer` (request spans, carrying a `request_id` field)
//! 4. Request ID (adopt or generate `x-request-id`)
//! 5. Security headers

pub mod request_id;
pub mod security_headers;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use security_headers::security_headers_middleware;
