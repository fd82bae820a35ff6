//! checkout-server
//!
//! Axum-based reference host for the checkout gateway workspace. Wires the
//! in-memory order/cart stores, the gateway registry, and the status
//! pipeline into a REST API.

mod handlers;
mod state;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use checkout_behalf::{BehalfGateway, BehalfSettings};
use checkout_core::{
    GatewayRegistry, MemoryCartStore, MemoryOrderStore, ReturnUrls, StatusPipeline,
};

use crate::handlers::{
    checkout, create_order, get_order, health_check, list_gateways, order_email, payment_fields,
    thankyou_page,
};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    // Gateway settings are validated once, at startup; an invalid target
    // status never reaches checkout.
    let config = BehalfSettings::from_env().validate()?;

    if config.has_token() {
        tracing::info!("✓ Behalf gateway configured");
    } else {
        tracing::warn!("⚠ BEHALF_TOKEN not set - the payment widget will not load");
    }
    if !config.enabled {
        tracing::warn!("⚠ Behalf gateway disabled via settings");
    }
    tracing::info!(
        target_status = %config.target_order_status,
        "Orders will be held in the configured status after checkout"
    );

    let behalf_configured = config.has_token();

    // Stores
    let orders = Arc::new(MemoryOrderStore::new());
    let carts = Arc::new(MemoryCartStore::new());

    // Register gateways once, at startup
    let mut registry = GatewayRegistry::new();
    registry.register(Arc::new(BehalfGateway::new(config)));
    let gateways = Arc::new(registry);

    let base_url = std::env::var("STORE_BASE_URL")
        .unwrap_or_else(|_| "http://localhost:3000".into());

    // Build application state
    let state = AppState {
        orders: orders.clone(),
        carts,
        status: Arc::new(StatusPipeline::new(orders, gateways.clone())),
        gateways,
        urls: ReturnUrls::new(base_url),
        behalf_configured,
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        // Health & info
        .route("/health", get(health_check))
        .route("/api/gateways", get(list_gateways))
        // Orders
        .route("/api/orders", post(create_order))
        .route("/api/orders/{id}", get(get_order))
        .route("/api/orders/{id}/thankyou", get(thankyou_page))
        .route("/api/orders/{id}/email", get(order_email))
        // Checkout
        .route("/api/checkout", post(checkout))
        .route("/api/checkout/fields/{gateway}", get(payment_fields))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🛒 checkout-server running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health                        - Health check");
    tracing::info!("  GET  /api/gateways                  - Enabled payment gateways");
    tracing::info!("  POST /api/orders                    - Create order from cart lines");
    tracing::info!("  GET  /api/orders/{{id}}               - Fetch order");
    tracing::info!("  GET  /api/orders/{{id}}/thankyou      - Order-received content");
    tracing::info!("  GET  /api/orders/{{id}}/email         - Email content injection");
    tracing::info!("  POST /api/checkout                  - Finalize checkout");
    tracing::info!("  GET  /api/checkout/fields/{{gateway}} - Payment widget fragment");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
