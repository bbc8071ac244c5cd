//! HTTP route handlers for the webshop API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Liveness message
//! GET  /health                 - Health check
//! GET  /health/ready           - Store readiness check
//! GET  /schema                 - Raw schema source text (debug viewer)
//! GET  /test                   - Store diagnostics
//!
//! # Catalog
//! GET  /api/categories         - List all categories
//! POST /api/products/search    - Filtered product search
//!
//! # Checkout
//! POST /api/checkout           - Create a pending order
//! POST /api/payment/confirm    - Simulated payment webhook
//!
//! # Content
//! GET  /api/blog               - Blog posts (max 20)
//! GET  /api/testimonials       - Testimonials (max 20)
//! GET  /api/portfolio          - Portfolio items (max 20)
//! ```

pub mod catalog;
pub mod checkout;
pub mod content;
pub mod diagnostics;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(catalog::list_categories))
        .route("/products/search", post(catalog::search_products))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/checkout", post(checkout::checkout))
        .route("/payment/confirm", post(checkout::confirm_payment))
}

/// Create the content routes router.
pub fn content_routes() -> Router<AppState> {
    Router::new()
        .route("/blog", get(content::list_blog))
        .route("/testimonials", get(content::list_testimonials))
        .route("/portfolio", get(content::list_portfolio))
}

/// Create the combined /api router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(catalog_routes())
        .merge(checkout_routes())
        .merge(content_routes())
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Diagnostics at the root
        .route("/", get(diagnostics::root))
        .route("/health", get(diagnostics::health))
        .route("/health/ready", get(diagnostics::readiness))
        .route("/schema", get(diagnostics::schema))
        .route("/test", get(diagnostics::store_diagnostics))
        // Business routes under /api
        .nest("/api", api_routes())
}
