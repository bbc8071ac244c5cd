//! Liveness, schema introspection, and store diagnostics.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use webshop_core::schema::SCHEMA_SOURCE;

use crate::state::AppState;

/// Number of collection names sampled by the diagnostics report.
const COLLECTION_SAMPLE: u32 = 10;

/// Response for the site root.
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

/// Static liveness message for the site root.
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Webshop backend running",
    })
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies store connectivity before returning OK.
/// Returns 503 Service Unavailable if the store is not reachable.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.store().ping().await {
        Ok(()) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Response for schema introspection.
#[derive(Debug, Serialize)]
pub struct SchemaResponse {
    pub source: &'static str,
}

/// Raw source text of the collection schema definitions, consumed by the
/// external database viewer. Not structured metadata.
pub async fn schema() -> Json<SchemaResponse> {
    Json(SchemaResponse {
        source: SCHEMA_SOURCE,
    })
}

/// Store connectivity report. Purely diagnostic; business logic never reads
/// any of this.
#[derive(Debug, Serialize)]
pub struct StoreDiagnostics {
    pub backend: &'static str,
    pub database: String,
    /// Whether `DATABASE_URL` was set.
    pub database_url: &'static str,
    /// Whether `DATABASE_NAME` was set.
    pub database_name: &'static str,
    /// The schema name actually in use (set or defaulted).
    pub store_name: String,
    pub connection_status: &'static str,
    pub collections: Vec<String>,
}

/// Report store connectivity, resolved configuration flags, and a sample of
/// collection names.
pub async fn store_diagnostics(State(state): State<AppState>) -> Json<StoreDiagnostics> {
    let config = state.config();
    let store = state.store();

    let (database, connection_status, collections) = if store.is_configured() {
        match store.list_collections(COLLECTION_SAMPLE).await {
            Ok(collections) => ("connected".to_owned(), "connected", collections),
            Err(error) => (format!("error: {error}"), "error", Vec::new()),
        }
    } else {
        ("not configured".to_owned(), "not connected", Vec::new())
    };

    Json(StoreDiagnostics {
        backend: "running",
        database,
        database_url: set_flag(config.store_configured()),
        database_name: set_flag(config.database_name_set),
        store_name: config.database_name.clone(),
        connection_status,
        collections,
    })
}

const fn set_flag(set: bool) -> &'static str {
    if set { "set" } else { "not set" }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::config::WebshopConfig;

    use super::*;

    fn unconfigured_state() -> AppState {
        let config = WebshopConfig {
            database_url: None,
            database_name: "webshop".to_owned(),
            database_name_set: false,
            host: "127.0.0.1".parse().unwrap(),
            port: 8000,
            sentry_dsn: None,
        };
        AppState::from_config(config).unwrap()
    }

    #[tokio::test]
    async fn test_root_liveness_message() {
        let Json(response) = root().await;
        assert_eq!(response.message, "Webshop backend running");
    }

    #[tokio::test]
    async fn test_schema_returns_source_text() {
        let Json(response) = schema().await;
        assert!(response.source.contains("pub struct Product"));
        assert!(response.source.contains("pub struct PortfolioItem"));
    }

    #[tokio::test]
    async fn test_diagnostics_report_degraded_store() {
        let Json(report) = store_diagnostics(State(unconfigured_state())).await;

        assert_eq!(report.backend, "running");
        assert_eq!(report.database, "not configured");
        assert_eq!(report.database_url, "not set");
        assert_eq!(report.database_name, "not set");
        assert_eq!(report.store_name, "webshop");
        assert_eq!(report.connection_status, "not connected");
        assert!(report.collections.is_empty());
    }

    #[tokio::test]
    async fn test_readiness_degraded_store() {
        let status = readiness(State(unconfigured_state())).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
