//! Webshop Core - Shared types library.
//!
//! This crate provides the types shared between the webshop components:
//! - `api` - Public JSON API service
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for document ids, emails, and statuses
//! - [`schema`] - Declarative shapes for each store collection
//! - [`query`] - Structured query predicates for the document store

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod query;
pub mod schema;
pub mod types;

pub use types::*;
