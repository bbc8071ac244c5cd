//! Document store backed by `PostgreSQL`.
//!
//! Collections are not separate tables: the store keeps every document in a
//! single JSONB table, discriminated by a `collection` column, inside the
//! configured schema:
//!
//! ```text
//! <schema>.document (
//!     id         UUID PRIMARY KEY DEFAULT gen_random_uuid(),
//!     collection TEXT NOT NULL,
//!     doc        JSONB NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT now()
//! )
//! ```
//!
//! The table is bootstrapped with `CREATE ... IF NOT EXISTS` on startup; a
//! schema-flexible store has no migration history to track.

mod documents;

pub use documents::DocumentStore;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

/// Errors surfaced by document store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No connection string was configured; the client was never initialized.
    #[error("document store is not configured")]
    NotConfigured,

    /// The backing store rejected or failed the operation.
    #[error("document store error: {0}")]
    Query(#[from] sqlx::Error),

    /// Requested document was not found.
    #[error("document not found")]
    NotFound,
}

/// Create a lazily-connecting `PostgreSQL` pool.
///
/// Connections are established on first use, so startup succeeds even while
/// the store is unreachable; errors surface per request instead.
///
/// # Errors
///
/// Returns `StoreError` if the connection string fails to parse.
pub fn create_pool(database_url: &SecretString) -> Result<PgPool, StoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect_lazy(database_url.expose_secret())?;

    Ok(pool)
}
