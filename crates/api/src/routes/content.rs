//! Read-only content listings: blog posts, testimonials, portfolio items.
//!
//! Three identical shapes, parameterized only by collection name and the
//! response key.

use axum::Json;
use axum::extract::State;
use serde::Serialize;
use serde_json::Value;

use webshop_core::query::Filter;
use webshop_core::schema::collections;

use crate::error::Result;
use crate::state::AppState;

/// Cap applied to every content listing.
const CONTENT_LIMIT: u32 = 20;

async fn list_content(state: &AppState, collection: &str) -> Result<Vec<Value>> {
    let docs = state
        .store()
        .get_documents(collection, &Filter::new(), Some(CONTENT_LIMIT))
        .await?;
    Ok(docs)
}

/// Response for the blog listing.
#[derive(Debug, Serialize)]
pub struct BlogResponse {
    pub posts: Vec<Value>,
}

/// List up to 20 blog posts.
///
/// # Errors
///
/// Returns an error if the store is unconfigured or the query fails.
pub async fn list_blog(State(state): State<AppState>) -> Result<Json<BlogResponse>> {
    let posts = list_content(&state, collections::BLOG_POST).await?;
    Ok(Json(BlogResponse { posts }))
}

/// Response for the testimonial listing.
#[derive(Debug, Serialize)]
pub struct TestimonialsResponse {
    pub testimonials: Vec<Value>,
}

/// List up to 20 testimonials.
///
/// # Errors
///
/// Returns an error if the store is unconfigured or the query fails.
pub async fn list_testimonials(
    State(state): State<AppState>,
) -> Result<Json<TestimonialsResponse>> {
    let testimonials = list_content(&state, collections::TESTIMONIAL).await?;
    Ok(Json(TestimonialsResponse { testimonials }))
}

/// Response for the portfolio listing.
#[derive(Debug, Serialize)]
pub struct PortfolioResponse {
    pub items: Vec<Value>,
}

/// List up to 20 portfolio items.
///
/// # Errors
///
/// Returns an error if the store is unconfigured or the query fails.
pub async fn list_portfolio(State(state): State<AppState>) -> Result<Json<PortfolioResponse>> {
    let items = list_content(&state, collections::PORTFOLIO_ITEM).await?;
    Ok(Json(PortfolioResponse { items }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::config::WebshopConfig;
    use crate::db::StoreError;
    use crate::error::AppError;

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
    async fn test_listings_fail_without_store() {
        let state = unconfigured_state();

        let err = list_blog(State(state.clone())).await.unwrap_err();
        assert!(matches!(err, AppError::Store(StoreError::NotConfigured)));

        let err = list_testimonials(State(state.clone())).await.unwrap_err();
        assert!(matches!(err, AppError::Store(StoreError::NotConfigured)));

        let err = list_portfolio(State(state)).await.unwrap_err();
        assert!(matches!(err, AppError::Store(StoreError::NotConfigured)));
    }
}
