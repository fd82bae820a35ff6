//! Order Status Resolution
//!
//! When an order's payment completes, the host asks the gateway that took
//! payment which final status to assign. The resolver is an explicit
//! capability invoked directly by the [`StatusPipeline`]; gateways that do
//! not own the order must pass the candidate through unchanged.

use std::sync::Arc;

use crate::error::{HostError, Result};
use crate::gateway::GatewayRegistry;
use crate::order::{Order, OrderId, OrderStatus};
use crate::store::OrderStore;

/// Capability for deciding an order's post-payment status
pub trait StatusResolver: Send + Sync {
    /// Decide the final status for an order
    ///
    /// Pure decision rule: no side effects, no host access.
    fn resolve_final_status(&self, candidate: OrderStatus, order: &Order) -> OrderStatus;

    /// Audit note to attach when the status is resolved
    fn audit_note(&self, order: &Order) -> Option<String> {
        let _ = order;
        None
    }
}

/// Host-side status assignment pipeline
pub struct StatusPipeline {
    orders: Arc<dyn OrderStore>,
    gateways: Arc<GatewayRegistry>,
}

impl StatusPipeline {
    pub fn new(orders: Arc<dyn OrderStore>, gateways: Arc<GatewayRegistry>) -> Self {
        Self { orders, gateways }
    }

    /// Assign the post-payment status for an order
    ///
    /// Looks up the gateway registered under the order's payment method and
    /// lets it override the host's candidate status. Orders paid through an
    /// unregistered method keep the candidate. The resolver's audit note is
    /// appended at most once per order, so re-evaluation is safe.
    pub fn payment_complete(
        &self,
        order_id: OrderId,
        candidate: OrderStatus,
    ) -> Result<OrderStatus> {
        let order = self
            .orders
            .get(order_id)?
            .ok_or(HostError::OrderNotFound(order_id))?;

        let resolved = match self.gateways.get(&order.payment_method) {
            Some(gateway) => {
                let status = gateway.resolve_final_status(candidate, &order);
                if let Some(note) = gateway.audit_note(&order) {
                    self.orders.append_note_once(order_id, &note)?;
                }
                status
            }
            None => candidate,
        };

        self.orders.update_status(order_id, resolved)?;

        tracing::info!(
            order_id = %order_id,
            payment_method = %order.payment_method,
            status = %resolved,
            "Resolved post-payment order status"
        );

        Ok(resolved)
    }
}
