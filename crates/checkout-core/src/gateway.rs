//! Payment Gateway Capability
//!
//! Pluggable payment methods registered into the host checkout system.
//! Gateways are constructed once at startup and registered into a
//! [`GatewayRegistry`]; every host collaborator a gateway touches is handed
//! in explicitly through a [`CheckoutContext`].

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::cart::{CartSessionId, CartStore};
use crate::error::Result;
use crate::order::{Order, OrderId};
use crate::status::StatusResolver;
use crate::store::OrderStore;
use crate::urls::ReturnUrls;

/// Marker for the outcome of payment processing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentResult {
    Success,
    Failure,
}

/// Outcome of a gateway's payment-processing step
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PaymentOutcome {
    /// Success marker
    pub result: PaymentResult,

    /// Where the host sends the customer next
    pub redirect: String,
}

impl PaymentOutcome {
    pub fn success(redirect: impl Into<String>) -> Self {
        Self {
            result: PaymentResult::Success,
            redirect: redirect.into(),
        }
    }
}

/// Host collaborators for one checkout request
///
/// Gateways hold no ambient host state; orders, carts, and URL construction
/// arrive as parameters.
#[derive(Clone)]
pub struct CheckoutContext {
    /// Order persistence
    pub orders: Arc<dyn OrderStore>,

    /// Cart persistence
    pub carts: Arc<dyn CartStore>,

    /// Cart session of the customer checking out
    pub session: CartSessionId,

    /// Canonical host URLs
    pub urls: ReturnUrls,
}

/// A pluggable payment method
#[async_trait]
pub trait PaymentGateway: StatusResolver {
    /// Unique gateway identifier, matched against `Order::payment_method`
    fn id(&self) -> &str;

    /// Title the customer sees during checkout
    fn title(&self) -> &str;

    /// Payment method description shown on the checkout page
    fn description(&self) -> Option<String> {
        None
    }

    /// Whether the gateway is currently offered at checkout
    fn enabled(&self) -> bool {
        true
    }

    /// Process payment for an order and return the redirect target
    async fn process_payment(
        &self,
        order_id: OrderId,
        ctx: &CheckoutContext,
    ) -> Result<PaymentOutcome>;

    /// Extra markup rendered inside the payment method's checkout area
    fn payment_fields(&self) -> Option<String> {
        None
    }

    /// Content for the order-received page
    fn thankyou_text(&self) -> Option<String> {
        None
    }

    /// Content injected into transactional emails for this order
    fn email_instructions(&self, order: &Order, sent_to_admin: bool) -> Option<String> {
        let _ = (order, sent_to_admin);
        None
    }
}

/// Registry of gateways, populated once at startup
#[derive(Default)]
pub struct GatewayRegistry {
    gateways: HashMap<String, Arc<dyn PaymentGateway>>,
}

impl GatewayRegistry {
    pub fn new() -> Self {
        Self {
            gateways: HashMap::new(),
        }
    }

    /// Register a gateway under its identifier
    pub fn register(&mut self, gateway: Arc<dyn PaymentGateway>) {
        tracing::info!(gateway = gateway.id(), "Registered payment gateway");
        self.gateways.insert(gateway.id().to_string(), gateway);
    }

    /// Look up a gateway by identifier
    pub fn get(&self, id: &str) -> Option<Arc<dyn PaymentGateway>> {
        self.gateways.get(id).cloned()
    }

    /// Gateways currently available for checkout, in stable order
    pub fn enabled(&self) -> Vec<Arc<dyn PaymentGateway>> {
        let mut list: Vec<_> = self
            .gateways
            .values()
            .filter(|gateway| gateway.enabled())
            .cloned()
            .collect();
        list.sort_by(|a, b| a.id().cmp(b.id()));
        list
    }

    pub fn len(&self) -> usize {
        self.gateways.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gateways.is_empty()
    }
}
