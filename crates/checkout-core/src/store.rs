//! Order Storage
//!
//! Persistence seam for host-owned order records. Gateways only ever read an
//! order, request one status mutation, and append audit notes through this
//! trait.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use crate::error::{HostError, Result};
use crate::order::{Order, OrderId, OrderStatus};

/// Order storage trait
pub trait OrderStore: Send + Sync {
    /// Allocate the next order identifier
    fn next_order_id(&self) -> Result<OrderId>;

    /// Save or replace an order
    fn save(&self, order: &Order) -> Result<()>;

    /// Get order by id
    fn get(&self, id: OrderId) -> Result<Option<Order>>;

    /// Set the order's status
    fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<()>;

    /// Append a note to the order's audit trail
    fn append_note(&self, id: OrderId, content: &str) -> Result<()>;

    /// Append a note unless an identical one is already on the trail
    ///
    /// Returns `true` if the note was appended. Re-invoking any path that
    /// records the same note leaves exactly one entry on the order.
    fn append_note_once(&self, id: OrderId, content: &str) -> Result<bool>;
}

/// In-memory order store (for development and tests)
pub struct MemoryOrderStore {
    orders: RwLock<HashMap<OrderId, Order>>,
    next_id: AtomicU64,
}

impl Default for MemoryOrderStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self {
            orders: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl OrderStore for MemoryOrderStore {
    fn next_order_id(&self) -> Result<OrderId> {
        Ok(OrderId::new(self.next_id.fetch_add(1, Ordering::Relaxed)))
    }

    fn save(&self, order: &Order) -> Result<()> {
        let mut orders = self.orders.write().unwrap();
        orders.insert(order.id, order.clone());
        Ok(())
    }

    fn get(&self, id: OrderId) -> Result<Option<Order>> {
        let orders = self.orders.read().unwrap();
        Ok(orders.get(&id).cloned())
    }

    fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<()> {
        let mut orders = self.orders.write().unwrap();
        let order = orders.get_mut(&id).ok_or(HostError::OrderNotFound(id))?;

        if order.status != status {
            tracing::info!(
                order_id = %id,
                from = %order.status,
                to = %status,
                "Order status changed"
            );
            order.status = status;
        }

        Ok(())
    }

    fn append_note(&self, id: OrderId, content: &str) -> Result<()> {
        let mut orders = self.orders.write().unwrap();
        let order = orders.get_mut(&id).ok_or(HostError::OrderNotFound(id))?;
        order.add_note(content);
        Ok(())
    }

    fn append_note_once(&self, id: OrderId, content: &str) -> Result<bool> {
        let mut orders = self.orders.write().unwrap();
        let order = orders.get_mut(&id).ok_or(HostError::OrderNotFound(id))?;

        if order.has_note(content) {
            return Ok(false);
        }

        order.add_note(content);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn stored_order(store: &MemoryOrderStore) -> Order {
        let order = Order::new(
            store.next_order_id().unwrap(),
            "behalf_gateway",
            "USD",
            dec!(250.00),
        );
        store.save(&order).unwrap();
        order
    }

    #[test]
    fn test_save_and_get() {
        let store = MemoryOrderStore::new();
        let order = stored_order(&store);

        let found = store.get(order.id).unwrap().unwrap();
        assert_eq!(found.id, order.id);
        assert_eq!(found.status, OrderStatus::Pending);
    }

    #[test]
    fn test_update_status_missing_order() {
        let store = MemoryOrderStore::new();
        let err = store
            .update_status(OrderId::new(999), OrderStatus::OnHold)
            .unwrap_err();
        assert!(matches!(err, HostError::OrderNotFound(_)));
    }

    #[test]
    fn test_append_note_once_is_idempotent() {
        let store = MemoryOrderStore::new();
        let order = stored_order(&store);

        assert!(store.append_note_once(order.id, "Transaction to be checked.").unwrap());
        assert!(!store.append_note_once(order.id, "Transaction to be checked.").unwrap());

        let found = store.get(order.id).unwrap().unwrap();
        assert_eq!(found.notes.len(), 1);
    }
}
