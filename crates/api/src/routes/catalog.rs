//! Catalog endpoints: category listing and product search.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use webshop_core::query::{Filter, Predicate};
use webshop_core::schema::collections;

use crate::error::Result;
use crate::state::AppState;

/// Result cap applied when a search names no limit.
const DEFAULT_SEARCH_LIMIT: u32 = 24;

/// Response for the category listing.
#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<Value>,
}

/// List every category document, unfiltered and uncapped.
///
/// # Errors
///
/// Returns an error if the store is unconfigured or the query fails.
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoriesResponse>> {
    let categories = state
        .store()
        .get_documents(collections::CATEGORY, &Filter::new(), None)
        .await?;

    Ok(Json(CategoriesResponse { categories }))
}

/// Product search criteria. All provided criteria are ANDed together; the
/// free-text query internally ORs over title and description.
#[derive(Debug, Deserialize)]
pub struct ProductSearchRequest {
    /// Category slug, exact match.
    #[serde(default)]
    pub category: Option<String>,
    /// Free-text query, case-insensitive substring.
    #[serde(default)]
    pub q: Option<String>,
    /// Match products whose tag set intersects these.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default = "default_search_limit")]
    pub limit: u32,
}

const fn default_search_limit() -> u32 {
    DEFAULT_SEARCH_LIMIT
}

/// Response for product search.
#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub products: Vec<Value>,
}

/// Search the product collection.
///
/// # Errors
///
/// Returns an error if the store is unconfigured or the query fails.
pub async fn search_products(
    State(state): State<AppState>,
    Json(request): Json<ProductSearchRequest>,
) -> Result<Json<ProductsResponse>> {
    let filter = build_product_filter(&request);
    let products = state
        .store()
        .get_documents(collections::PRODUCT, &filter, Some(request.limit))
        .await?;

    Ok(Json(ProductsResponse { products }))
}

/// Translate search criteria into a store filter. Empty strings and empty
/// tag lists count as absent.
fn build_product_filter(request: &ProductSearchRequest) -> Filter {
    let mut filter = Filter::new();

    if let Some(category) = request.category.as_deref().filter(|c| !c.is_empty()) {
        filter.push(Predicate::eq("category", category));
    }
    if let Some(q) = request.q.as_deref().filter(|q| !q.is_empty()) {
        filter.push(Predicate::any_of(vec![
            Predicate::contains("title", q),
            Predicate::contains("description", q),
        ]));
    }
    if let Some(tags) = request.tags.as_deref().filter(|t| !t.is_empty()) {
        filter.push(Predicate::intersects("tags", tags.to_vec()));
    }

    filter
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn request(value: Value) -> ProductSearchRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_limit_defaults_to_24() {
        let req = request(json!({}));
        assert_eq!(req.limit, 24);

        let req = request(json!({ "limit": 5 }));
        assert_eq!(req.limit, 5);
    }

    #[test]
    fn test_category_only_builds_single_eq() {
        let filter = build_product_filter(&request(json!({ "category": "tools" })));

        assert_eq!(
            filter.clauses(),
            &[Predicate::eq("category", "tools")]
        );
    }

    #[test]
    fn test_query_is_or_over_title_and_description() {
        let filter = build_product_filter(&request(json!({ "q": "lamp" })));

        assert_eq!(
            filter.clauses(),
            &[Predicate::any_of(vec![
                Predicate::contains("title", "lamp"),
                Predicate::contains("description", "lamp"),
            ])]
        );
    }

    #[test]
    fn test_tags_build_intersection() {
        let filter = build_product_filter(&request(json!({ "tags": ["sale", "new"] })));

        assert_eq!(
            filter.clauses(),
            &[Predicate::intersects(
                "tags",
                vec!["sale".to_owned(), "new".to_owned()]
            )]
        );
    }

    #[test]
    fn test_all_criteria_are_anded() {
        let filter = build_product_filter(&request(json!({
            "category": "lighting",
            "q": "lamp",
            "tags": ["sale"]
        })));

        assert_eq!(filter.clauses().len(), 3);
    }

    #[test]
    fn test_empty_criteria_are_ignored() {
        let filter = build_product_filter(&request(json!({
            "category": "",
            "q": "",
            "tags": []
        })));

        assert!(filter.is_empty());
    }
}
