//! Application State

use std::sync::Arc;

use checkout_core::{CartStore, GatewayRegistry, OrderStore, ReturnUrls, StatusPipeline};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Order persistence
    pub orders: Arc<dyn OrderStore>,

    /// Cart persistence
    pub carts: Arc<dyn CartStore>,

    /// Payment gateways registered at startup
    pub gateways: Arc<GatewayRegistry>,

    /// Post-payment status assignment
    pub status: Arc<StatusPipeline>,

    /// Canonical customer-facing URLs
    pub urls: ReturnUrls,

    /// Whether the Behalf gateway has a client token
    pub behalf_configured: bool,
}
