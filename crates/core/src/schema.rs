//! Collection schema definitions.
//!
//! One serde struct per store collection. The store itself is
//! schema-flexible; these shapes are used for request/response validation
//! only and are never enforced on stored documents. The collection name is
//! the lowercased struct name:
//! - `User` -> "user" collection
//! - `Product` -> "product" collection
//! - `BlogPost` -> "blogpost" collection

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::types::{Email, OrderStatus, UserRole};

/// Raw source text of this module, served by the schema-introspection
/// endpoint for the external database viewer.
pub const SCHEMA_SOURCE: &str = include_str!("schema.rs");

/// Collection names, one per schema struct.
pub mod collections {
    pub const USER: &str = "user";
    pub const CATEGORY: &str = "category";
    pub const PRODUCT: &str = "product";
    pub const ORDER: &str = "order";
    pub const BLOG_POST: &str = "blogpost";
    pub const TESTIMONIAL: &str = "testimonial";
    pub const PORTFOLIO_ITEM: &str = "portfolioitem";
}

/// A site user. Managed externally; no endpoint creates users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: Email,
    /// Postal address.
    #[serde(default)]
    pub address: Option<String>,
    /// Role; admin or customer.
    #[serde(default)]
    pub role: UserRole,
    /// Whether the user is active.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// A product category, referenced by products via its slug.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// URL-safe unique identifier.
    pub slug: String,
    /// Display name.
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A catalog product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Product title.
    pub title: String,
    /// Product description.
    #[serde(default)]
    pub description: Option<String>,
    /// Price in dollars; must be non-negative.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Category slug. A weak reference: nothing enforces that the category
    /// exists.
    pub category: String,
    /// Image URLs.
    #[serde(default)]
    pub images: Vec<Url>,
    /// Whether the product is in stock.
    #[serde(default = "default_true")]
    pub in_stock: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A line item inside an order or checkout payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: String,
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

/// An order. Created by checkout with status `pending`; payment confirmation
/// flips the status to `paid` or `failed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default)]
    pub user_email: Option<Email>,
    pub items: Vec<OrderItem>,
    /// Server-computed total; a client-supplied total is never trusted.
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    #[serde(default)]
    pub status: OrderStatus,
}

/// A blog post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub author: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A customer testimonial.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Testimonial {
    pub author: String,
    #[serde(default)]
    pub company: Option<String>,
    pub quote: String,
    #[serde(default)]
    pub url: Option<Url>,
    #[serde(default)]
    pub metric: Option<String>,
}

/// A portfolio entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioItem {
    pub client: String,
    #[serde(default)]
    pub logo: Option<Url>,
    #[serde(default)]
    pub url: Option<Url>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub metrics: Option<String>,
}

/// Compute an order total from its line items.
///
/// Checkout always recomputes the amount from the items it was sent.
#[must_use]
pub fn order_total(items: &[OrderItem]) -> Decimal {
    items
        .iter()
        .map(|item| item.unit_price * Decimal::from(item.quantity))
        .sum()
}

const fn default_true() -> bool {
    true
}

const fn default_quantity() -> u32 {
    1
}
