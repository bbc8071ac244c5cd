//! Checkout and simulated payment confirmation.

use axum::Json;
use axum::extract::State;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use webshop_core::schema::{Order, OrderItem, collections, order_total};
use webshop_core::types::{DocumentId, Email, OrderStatus};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Checkout payload: an optional customer email plus line items.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub email: Option<Email>,
    pub items: Vec<OrderItem>,
}

/// Checkout response: the persisted order and the amount left to pay.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub status: &'static str,
    pub order_id: DocumentId,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// Persist a pending order with a server-computed total.
///
/// The amount is always recomputed from the line items; a client-supplied
/// total is never trusted. There is no inventory check and no price
/// verification against the product collection.
///
/// # Errors
///
/// Returns 400 for invalid line items, or a store error if the order could
/// not be persisted.
pub async fn checkout(
    State(state): State<AppState>,
    Json(request): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>> {
    validate_items(&request.items)?;

    let total = order_total(&request.items);
    let order = Order {
        user_email: request.email,
        items: request.items,
        total,
        status: OrderStatus::Pending,
    };
    let order_doc =
        serde_json::to_value(&order).map_err(|e| AppError::Internal(e.to_string()))?;

    let order_id = state
        .store()
        .create_document(collections::ORDER, &order_doc)
        .await?;

    Ok(Json(CheckoutResponse {
        status: "requires_payment",
        order_id,
        amount: total,
    }))
}

/// Reject line items that violate the order invariants.
fn validate_items(items: &[OrderItem]) -> Result<()> {
    if items.is_empty() {
        return Err(AppError::BadRequest("items must not be empty".to_owned()));
    }
    for item in items {
        if item.quantity < 1 {
            return Err(AppError::BadRequest(format!(
                "quantity must be at least 1 for product {}",
                item.product_id
            )));
        }
        if item.unit_price < Decimal::ZERO {
            return Err(AppError::BadRequest(format!(
                "unit_price must be non-negative for product {}",
                item.product_id
            )));
        }
    }
    Ok(())
}

/// Payment confirmation payload, as a payment gateway webhook would send it.
#[derive(Debug, Deserialize)]
pub struct PaymentConfirmRequest {
    pub order_id: String,
    #[serde(default = "default_success")]
    pub success: bool,
}

const fn default_success() -> bool {
    true
}

/// Payment confirmation response.
#[derive(Debug, Serialize)]
pub struct PaymentConfirmResponse {
    pub status: OrderStatus,
}

/// Simulated payment-gateway webhook: flips the order to paid or failed.
///
/// Store failures (malformed order id, missing order, store down) are logged
/// and masked; the response always reports the requested outcome. A real
/// gateway integration would verify signatures, cross-check the amount, and
/// make this idempotent.
pub async fn confirm_payment(
    State(state): State<AppState>,
    Json(request): Json<PaymentConfirmRequest>,
) -> Json<PaymentConfirmResponse> {
    let status = if request.success {
        OrderStatus::Paid
    } else {
        OrderStatus::Failed
    };

    if let Err(error) = apply_order_status(&state, &request.order_id, status).await {
        warn!(
            order_id = %request.order_id,
            %error,
            "payment confirmation not persisted"
        );
    }

    Json(PaymentConfirmResponse { status })
}

async fn apply_order_status(state: &AppState, order_id: &str, status: OrderStatus) -> Result<()> {
    let id = DocumentId::parse(order_id).map_err(|e| AppError::BadRequest(e.to_string()))?;
    state
        .store()
        .update_document(collections::ORDER, id, &json!({ "status": status }))
        .await?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use webshop_core::schema::order_total;

    use crate::config::WebshopConfig;
    use crate::db::StoreError;

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

    fn items(value: serde_json::Value) -> Vec<OrderItem> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_validate_items_rejects_empty() {
        let err = validate_items(&[]).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_validate_items_rejects_zero_quantity() {
        let items = items(json!([
            { "product_id": "p1", "title": "Widget", "unit_price": 9.99, "quantity": 0 }
        ]));
        assert!(matches!(
            validate_items(&items),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_validate_items_rejects_negative_price() {
        let items = items(json!([
            { "product_id": "p1", "title": "Widget", "unit_price": -1.0 }
        ]));
        assert!(matches!(
            validate_items(&items),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_amount_ignores_client_total() {
        // Any client-supplied total is not even part of the request type;
        // the amount is derived from the items alone.
        let items = items(json!([
            { "product_id": "p1", "title": "Widget", "unit_price": 9.99, "quantity": 3 }
        ]));
        assert!(validate_items(&items).is_ok());
        assert_eq!(order_total(&items).to_string(), "29.97");
    }

    #[tokio::test]
    async fn test_checkout_fails_without_store() {
        let state = unconfigured_state();
        let request: CheckoutRequest = serde_json::from_value(json!({
            "items": [
                { "product_id": "p1", "title": "Widget", "unit_price": 9.99, "quantity": 3 }
            ]
        }))
        .unwrap();

        let err = checkout(State(state), Json(request)).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Store(StoreError::NotConfigured)
        ));
    }

    #[tokio::test]
    async fn test_confirm_payment_masks_store_failures() {
        let state = unconfigured_state();

        // Malformed id AND unconfigured store: the requested outcome is
        // still reported.
        let request: PaymentConfirmRequest =
            serde_json::from_value(json!({ "order_id": "not-a-uuid" })).unwrap();
        let Json(response) = confirm_payment(State(state.clone()), Json(request)).await;
        assert_eq!(response.status, OrderStatus::Paid);

        let request: PaymentConfirmRequest =
            serde_json::from_value(json!({ "order_id": "not-a-uuid", "success": false }))
                .unwrap();
        let Json(response) = confirm_payment(State(state), Json(request)).await;
        assert_eq!(response.status, OrderStatus::Failed);
    }

    #[test]
    fn test_success_defaults_to_true() {
        let request: PaymentConfirmRequest =
            serde_json::from_value(json!({ "order_id": "abc" })).unwrap();
        assert!(request.success);
    }
}
