//! HTTP Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use checkout_core::{
    Cart, CartItem, CartStore, CheckoutContext, HostError, Order, OrderId, OrderStatus,
    OrderStore, PaymentGateway, PaymentResult,
};

use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub gateways: usize,
    pub behalf_configured: bool,
}

#[derive(Serialize)]
pub struct GatewayInfo {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CartItemRequest {
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    /// Gateway the customer picked at checkout
    pub payment_method: String,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub items: Vec<CartItemRequest>,
    #[serde(default)]
    pub session_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    pub order_id: u64,
    pub session_id: Uuid,
    pub status: OrderStatus,
    pub total: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub order_id: u64,
    pub session_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub result: PaymentResult,
    pub redirect: String,
    pub status: OrderStatus,
}

#[derive(Serialize)]
pub struct PaymentFieldsResponse {
    pub gateway: String,
    pub title: String,
    pub html: String,
}

#[derive(Serialize)]
pub struct ThankYouResponse {
    pub order_id: u64,
    pub status: OrderStatus,
    pub html: String,
}

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    #[serde(default)]
    pub recipient: Option<String>,
}

#[derive(Serialize)]
pub struct EmailContentResponse {
    pub order_id: u64,
    pub html: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn host_error(err: HostError) -> HandlerError {
    let (status, code) = match &err {
        HostError::OrderNotFound(_) => (StatusCode::NOT_FOUND, "ORDER_NOT_FOUND"),
        HostError::GatewayNotFound(_) => (StatusCode::NOT_FOUND, "GATEWAY_NOT_FOUND"),
        HostError::CartNotFound(_) => (StatusCode::NOT_FOUND, "CART_NOT_FOUND"),
        HostError::UnknownStatus(_) => (StatusCode::UNPROCESSABLE_ENTITY, "UNKNOWN_STATUS"),
        HostError::HostUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "HOST_UNAVAILABLE"),
    };
    (
        status,
        Json(ErrorResponse {
            error: err.user_message().into(),
            code: code.into(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        gateways: state.gateways.len(),
        behalf_configured: state.behalf_configured,
    })
}

/// Gateways currently offered at checkout
pub async fn list_gateways(State(state): State<AppState>) -> Json<Vec<GatewayInfo>> {
    let gateways = state
        .gateways
        .enabled()
        .into_iter()
        .map(|gateway| GatewayInfo {
            id: gateway.id().to_string(),
            title: gateway.title().to_string(),
            description: gateway.description(),
        })
        .collect();
    Json(gateways)
}

/// Create an order from the session's cart lines
pub async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<Json<CreateOrderResponse>, HandlerError> {
    let session = payload.session_id.unwrap_or_else(Uuid::new_v4);

    let cart = Cart {
        items: payload
            .items
            .into_iter()
            .map(|item| CartItem {
                name: item.name,
                quantity: item.quantity,
                unit_price: item.unit_price,
            })
            .collect(),
    };
    let total = cart.total();
    state.carts.put(session, cart).map_err(host_error)?;

    let order_id = state.orders.next_order_id().map_err(host_error)?;
    let order = Order::new(
        order_id,
        payload.payment_method,
        payload.currency.unwrap_or_else(|| "USD".into()),
        total,
    );
    state.orders.save(&order).map_err(host_error)?;

    tracing::info!(order_id = %order_id, total = %total, "Order created");

    Ok(Json(CreateOrderResponse {
        order_id: order_id.as_u64(),
        session_id: session,
        status: order.status,
        total,
    }))
}

/// Fetch an order record
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Order>, HandlerError> {
    let order_id = OrderId::new(id);
    let order = state
        .orders
        .get(order_id)
        .map_err(host_error)?
        .ok_or_else(|| host_error(HostError::OrderNotFound(order_id)))?;
    Ok(Json(order))
}

/// Finalize checkout through the order's gateway
///
/// Runs the gateway's payment processing, then the host's status pipeline
/// with its default post-payment candidate.
pub async fn checkout(
    State(state): State<AppState>,
    Json(payload): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, HandlerError> {
    let order_id = OrderId::new(payload.order_id);
    let order = state
        .orders
        .get(order_id)
        .map_err(host_error)?
        .ok_or_else(|| host_error(HostError::OrderNotFound(order_id)))?;

    let gateway = state
        .gateways
        .get(&order.payment_method)
        .ok_or_else(|| host_error(HostError::GatewayNotFound(order.payment_method.clone())))?;

    if !gateway.enabled() {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: "This payment method is currently unavailable.".into(),
                code: "GATEWAY_DISABLED".into(),
            }),
        ));
    }

    let ctx = CheckoutContext {
        orders: state.orders.clone(),
        carts: state.carts.clone(),
        session: payload.session_id,
        urls: state.urls.clone(),
    };

    let outcome = gateway
        .process_payment(order_id, &ctx)
        .await
        .map_err(|err| {
            tracing::error!(order_id = %order_id, "Checkout failed: {err}");
            host_error(err)
        })?;

    let status = state
        .status
        .payment_complete(order_id, OrderStatus::Processing)
        .map_err(host_error)?;

    Ok(Json(CheckoutResponse {
        result: outcome.result,
        redirect: outcome.redirect,
        status,
    }))
}

/// Rendered payment-fields fragment for a gateway's checkout area
pub async fn payment_fields(
    State(state): State<AppState>,
    Path(gateway_id): Path<String>,
) -> Result<Json<PaymentFieldsResponse>, HandlerError> {
    let gateway = state
        .gateways
        .get(&gateway_id)
        .ok_or_else(|| host_error(HostError::GatewayNotFound(gateway_id)))?;

    Ok(Json(PaymentFieldsResponse {
        gateway: gateway.id().to_string(),
        title: gateway.title().to_string(),
        html: gateway.payment_fields().unwrap_or_default(),
    }))
}

/// Order-received page content
pub async fn thankyou_page(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ThankYouResponse>, HandlerError> {
    let order_id = OrderId::new(id);
    let order = state
        .orders
        .get(order_id)
        .map_err(host_error)?
        .ok_or_else(|| host_error(HostError::OrderNotFound(order_id)))?;

    let html = state
        .gateways
        .get(&order.payment_method)
        .and_then(|gateway| gateway.thankyou_text())
        .unwrap_or_default();

    Ok(Json(ThankYouResponse {
        order_id: id,
        status: order.status,
        html,
    }))
}

/// Content injected into the order confirmation email
pub async fn order_email(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<EmailContentResponse>, HandlerError> {
    let order_id = OrderId::new(id);
    let order = state
        .orders
        .get(order_id)
        .map_err(host_error)?
        .ok_or_else(|| host_error(HostError::OrderNotFound(order_id)))?;

    let sent_to_admin = query.recipient.as_deref() == Some("admin");
    let html = state
        .gateways
        .get(&order.payment_method)
        .and_then(|gateway| gateway.email_instructions(&order, sent_to_admin))
        .unwrap_or_default();

    Ok(Json(EmailContentResponse { order_id: id, html }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_behalf::{BehalfGateway, BehalfSettings, AUDIT_NOTE, GATEWAY_ID};
    use checkout_core::{
        GatewayRegistry, MemoryCartStore, MemoryOrderStore, ReturnUrls, StatusPipeline,
    };
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn app_state(target_status: &str) -> AppState {
        let orders = Arc::new(MemoryOrderStore::new());
        let carts = Arc::new(MemoryCartStore::new());

        let config = BehalfSettings {
            behalf_token: Some("tok_test".into()),
            behalf_order_status: Some(target_status.into()),
            ..Default::default()
        }
        .validate()
        .unwrap();

        let mut registry = GatewayRegistry::new();
        registry.register(Arc::new(BehalfGateway::new(config)));
        let gateways = Arc::new(registry);

        AppState {
            orders: orders.clone(),
            carts,
            status: Arc::new(StatusPipeline::new(orders, gateways.clone())),
            gateways,
            urls: ReturnUrls::new("https://shop.example.com"),
            behalf_configured: true,
        }
    }

    async fn place_order(state: &AppState) -> CreateOrderResponse {
        let response = create_order(
            State(state.clone()),
            Json(CreateOrderRequest {
                payment_method: GATEWAY_ID.into(),
                currency: None,
                items: vec![CartItemRequest {
                    name: "Pallet jack".into(),
                    quantity: 1,
                    unit_price: dec!(649.00),
                }],
                session_id: None,
            }),
        )
        .await
        .unwrap();
        response.0
    }

    #[tokio::test]
    async fn test_checkout_lands_on_configured_status() {
        let state = app_state("wc-on-hold");
        let created = place_order(&state).await;

        let response = checkout(
            State(state.clone()),
            Json(CheckoutRequest {
                order_id: created.order_id,
                session_id: created.session_id,
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.0.result, PaymentResult::Success);
        assert_eq!(response.0.status, OrderStatus::OnHold);

        let order = state
            .orders
            .get(OrderId::new(created.order_id))
            .unwrap()
            .unwrap();
        assert_eq!(order.status, OrderStatus::OnHold);
        assert!(order.has_note(AUDIT_NOTE));
        assert_eq!(order.notes.len(), 1);
    }

    #[tokio::test]
    async fn test_checkout_redirects_to_order_received() {
        let state = app_state("wc-pending");
        let created = place_order(&state).await;

        let response = checkout(
            State(state.clone()),
            Json(CheckoutRequest {
                order_id: created.order_id,
                session_id: created.session_id,
            }),
        )
        .await
        .unwrap();

        assert_eq!(
            response.0.redirect,
            format!(
                "https://shop.example.com/checkout/order-received/{}/",
                created.order_id
            )
        );
        let cart = state.carts.get(created.session_id).unwrap().unwrap();
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_checkout_unknown_order_is_404() {
        let state = app_state("wc-pending");

        let err = checkout(
            State(state),
            Json(CheckoutRequest {
                order_id: 12345,
                session_id: Uuid::new_v4(),
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.0, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_email_content_gated_by_recipient() {
        let state = app_state("wc-on-hold");
        let created = place_order(&state).await;

        checkout(
            State(state.clone()),
            Json(CheckoutRequest {
                order_id: created.order_id,
                session_id: created.session_id,
            }),
        )
        .await
        .unwrap();

        let customer = order_email(
            State(state.clone()),
            Path(created.order_id),
            Query(EmailQuery { recipient: None }),
        )
        .await
        .unwrap();
        assert!(!customer.0.html.is_empty());

        let admin = order_email(
            State(state),
            Path(created.order_id),
            Query(EmailQuery {
                recipient: Some("admin".into()),
            }),
        )
        .await
        .unwrap();
        assert!(admin.0.html.is_empty());
    }
}
