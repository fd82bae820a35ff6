//! Canonical Host URLs

use serde::{Deserialize, Serialize};

use crate::order::Order;

/// Builder for the host's canonical customer-facing URLs
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReturnUrls {
    base: String,
}

impl ReturnUrls {
    /// Create from the store's base URL; trailing slashes are stripped
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }

    /// The order-received page for an order
    pub fn order_received(&self, order: &Order) -> String {
        format!("{}/checkout/order-received/{}/", self.base, order.id)
    }
}
