//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, transaction per route)
//! 2. `TraceLayer` (request span)
//! 3. Request ID
//! 4. Security headers (mints the CSP nonce)
//! 5. Session layer
//! 6. Rate limiting (mutating routes only)

pub mod rate_limit;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use rate_limit::{RateLimiterLayer, mutation_rate_limiter};
pub use request_id::request_id_middleware;
pub use security_headers::{CspNonce, security_headers_middleware};
pub use session::create_session_layer;
