//! Generic document operations and predicate translation.

use serde_json::Value;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use tracing::{debug, instrument};
use uuid::Uuid;

use webshop_core::DocumentId;
use webshop_core::query::{Filter, Predicate};

use super::StoreError;

/// Client for the JSONB-backed document store.
///
/// Cheap to clone; holds the pool (when configured) and the schema name the
/// `document` table lives in. Concurrency control is delegated entirely to
/// the pool and the database. When built without a pool, every operation
/// returns [`StoreError::NotConfigured`].
#[derive(Clone)]
pub struct DocumentStore {
    pool: Option<PgPool>,
    schema: String,
}

impl DocumentStore {
    /// Create a store client. `schema` must be a validated identifier; the
    /// config layer guarantees this before it reaches the store.
    #[must_use]
    pub fn new(pool: Option<PgPool>, schema: impl Into<String>) -> Self {
        Self {
            pool,
            schema: schema.into(),
        }
    }

    /// Whether a connection string was configured for this client.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.pool.is_some()
    }

    fn pool(&self) -> Result<&PgPool, StoreError> {
        self.pool.as_ref().ok_or(StoreError::NotConfigured)
    }

    fn table(&self) -> String {
        format!("{}.document", self.schema)
    }

    /// Create the schema and document table if they do not exist.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if unconfigured or if the store is unreachable;
    /// startup logs the failure and continues degraded.
    pub async fn bootstrap(&self) -> Result<(), StoreError> {
        let pool = self.pool()?;

        sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", self.schema))
            .execute(pool)
            .await?;
        sqlx::query(&format!(
            "CREATE TABLE IF NOT EXISTS {} (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                collection TEXT NOT NULL,
                doc JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )",
            self.table()
        ))
        .execute(pool)
        .await?;
        sqlx::query(&format!(
            "CREATE INDEX IF NOT EXISTS document_collection_idx ON {} (collection)",
            self.table()
        ))
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Insert a document and return its store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if unconfigured or if the insert fails.
    #[instrument(skip(self, doc))]
    pub async fn create_document(
        &self,
        collection: &str,
        doc: &Value,
    ) -> Result<DocumentId, StoreError> {
        let pool = self.pool()?;

        let id: Uuid = sqlx::query_scalar(&format!(
            "INSERT INTO {} (collection, doc) VALUES ($1, $2) RETURNING id",
            self.table()
        ))
        .bind(collection)
        .bind(doc)
        .fetch_one(pool)
        .await?;

        debug!(%id, "inserted document");
        Ok(DocumentId::new(id))
    }

    /// Fetch documents matching `filter`, in insertion order, with the
    /// store-assigned id merged into each document as a string `id` field.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if unconfigured or if the query fails.
    #[instrument(skip(self, filter))]
    pub async fn get_documents(
        &self,
        collection: &str,
        filter: &Filter,
        limit: Option<u32>,
    ) -> Result<Vec<Value>, StoreError> {
        let pool = self.pool()?;

        let mut query = build_select(&self.table(), collection, filter, limit);
        let rows = query.build().fetch_all(pool).await?;

        let mut docs = Vec::with_capacity(rows.len());
        for row in rows {
            let id: Uuid = row.try_get("id")?;
            let mut doc: Value = row.try_get("doc")?;
            if let Some(fields) = doc.as_object_mut() {
                fields.insert("id".to_owned(), Value::String(id.to_string()));
            }
            docs.push(doc);
        }

        debug!(count = docs.len(), "fetched documents");
        Ok(docs)
    }

    /// Shallow-merge `patch` into an existing document.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no document matched, `StoreError`
    /// if unconfigured or if the update fails.
    #[instrument(skip(self, patch))]
    pub async fn update_document(
        &self,
        collection: &str,
        id: DocumentId,
        patch: &Value,
    ) -> Result<(), StoreError> {
        let pool = self.pool()?;

        let result = sqlx::query(&format!(
            "UPDATE {} SET doc = doc || $3 WHERE collection = $1 AND id = $2",
            self.table()
        ))
        .bind(collection)
        .bind(id.as_uuid())
        .bind(patch)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    /// Distinct collection names present in the store.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if unconfigured or if the query fails.
    pub async fn list_collections(&self, limit: u32) -> Result<Vec<String>, StoreError> {
        let pool = self.pool()?;

        let names = sqlx::query_scalar(&format!(
            "SELECT DISTINCT collection FROM {} ORDER BY collection LIMIT $1",
            self.table()
        ))
        .bind(i64::from(limit))
        .fetch_all(pool)
        .await?;

        Ok(names)
    }

    /// Round-trip connectivity check.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if unconfigured or if the store is unreachable.
    pub async fn ping(&self) -> Result<(), StoreError> {
        let pool = self.pool()?;
        sqlx::query("SELECT 1").fetch_one(pool).await?;
        Ok(())
    }
}

/// Build the SELECT for `get_documents`. Field names and values are always
/// bound as parameters, never spliced into the SQL text.
fn build_select(
    table: &str,
    collection: &str,
    filter: &Filter,
    limit: Option<u32>,
) -> QueryBuilder<'static, Postgres> {
    let mut query =
        QueryBuilder::<Postgres>::new(format!("SELECT id, doc FROM {table} WHERE collection = "));
    query.push_bind(collection.to_owned());

    for clause in filter.clauses() {
        query.push(" AND ");
        push_predicate(&mut query, clause);
    }

    query.push(" ORDER BY created_at, id");

    if let Some(limit) = limit {
        query.push(" LIMIT ");
        query.push_bind(i64::from(limit));
    }

    query
}

/// Append one predicate to the WHERE clause.
fn push_predicate(query: &mut QueryBuilder<'static, Postgres>, predicate: &Predicate) {
    match predicate {
        Predicate::Eq { field, value } => {
            query.push("doc -> ");
            query.push_bind(field.clone());
            query.push(" = ");
            query.push_bind(value.clone());
        }
        Predicate::Contains { field, needle } => {
            query.push("doc ->> ");
            query.push_bind(field.clone());
            query.push(" ILIKE ");
            query.push_bind(format!("%{}%", escape_like(needle)));
        }
        Predicate::Intersects { field, values } => {
            // jsonb ?| text[]: true when the array field shares an element
            query.push("doc -> ");
            query.push_bind(field.clone());
            query.push(" ?| ");
            query.push_bind(values.clone());
        }
        Predicate::Any(alternatives) => {
            if alternatives.is_empty() {
                // An empty OR matches nothing.
                query.push("FALSE");
                return;
            }
            query.push("(");
            for (i, alternative) in alternatives.iter().enumerate() {
                if i > 0 {
                    query.push(" OR ");
                }
                push_predicate(query, alternative);
            }
            query.push(")");
        }
    }
}

/// Escape LIKE wildcards so user text matches literally.
fn escape_like(needle: &str) -> String {
    needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use webshop_core::query::{Filter, Predicate};

    use super::*;

    fn select_sql(filter: &Filter, limit: Option<u32>) -> String {
        build_select("webshop.document", "product", filter, limit).into_sql()
    }

    #[test]
    fn test_select_empty_filter() {
        let sql = select_sql(&Filter::new(), None);
        assert_eq!(
            sql,
            "SELECT id, doc FROM webshop.document WHERE collection = $1 ORDER BY created_at, id"
        );
    }

    #[test]
    fn test_select_with_limit() {
        let sql = select_sql(&Filter::new(), Some(24));
        assert!(sql.ends_with("ORDER BY created_at, id LIMIT $2"));
    }

    #[test]
    fn test_select_clauses_are_anded() {
        let filter = Filter::new()
            .and(Predicate::eq("category", "tools"))
            .and(Predicate::intersects("tags", vec!["sale".to_owned()]));
        let sql = select_sql(&filter, Some(24));

        assert!(sql.contains("WHERE collection = $1 AND doc -> $2 = $3 AND doc -> $4 ?| $5"));
        assert!(sql.ends_with("LIMIT $6"));
    }

    #[test]
    fn test_select_text_search_is_grouped_or() {
        let filter = Filter::new().and(Predicate::any_of(vec![
            Predicate::contains("title", "lamp"),
            Predicate::contains("description", "lamp"),
        ]));
        let sql = select_sql(&filter, None);

        assert!(sql.contains("AND (doc ->> $2 ILIKE $3 OR doc ->> $4 ILIKE $5)"));
    }

    #[test]
    fn test_empty_or_matches_nothing() {
        let filter = Filter::new().and(Predicate::any_of(Vec::new()));
        let sql = select_sql(&filter, None);

        assert!(sql.contains("AND FALSE"));
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
    }

    #[tokio::test]
    async fn test_unconfigured_store_rejects_operations() {
        let store = DocumentStore::new(None, "webshop");
        assert!(!store.is_configured());

        let err = store
            .create_document("order", &serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotConfigured));

        let err = store
            .get_documents("product", &Filter::new(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotConfigured));

        let err = store.ping().await.unwrap_err();
        assert!(matches!(err, StoreError::NotConfigured));
    }
}
