//! Cart Sessions
//!
//! Session-scoped shopping carts. The cart is host-owned; finalizing a
//! checkout clears the active session's cart as a side effect.

use std::collections::HashMap;
use std::sync::RwLock;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{HostError, Result};

/// Identifier of a customer's cart session
pub type CartSessionId = Uuid;

/// A single cart line
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CartItem {
    /// Product name
    pub name: String,

    /// Quantity ordered
    pub quantity: u32,

    /// Per-unit price
    pub unit_price: Decimal,
}

/// A session's shopping cart
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of line totals
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .map(|item| item.unit_price * Decimal::from(item.quantity))
            .sum()
    }
}

/// Cart storage trait
pub trait CartStore: Send + Sync {
    /// Replace the session's cart
    fn put(&self, session: CartSessionId, cart: Cart) -> Result<()>;

    /// Get the session's cart
    fn get(&self, session: CartSessionId) -> Result<Option<Cart>>;

    /// Empty the session's cart
    fn clear(&self, session: CartSessionId) -> Result<()>;
}

/// In-memory cart store (for development and tests)
pub struct MemoryCartStore {
    carts: RwLock<HashMap<CartSessionId, Cart>>,
}

impl Default for MemoryCartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCartStore {
    pub fn new() -> Self {
        Self {
            carts: RwLock::new(HashMap::new()),
        }
    }
}

impl CartStore for MemoryCartStore {
    fn put(&self, session: CartSessionId, cart: Cart) -> Result<()> {
        let mut carts = self.carts.write().unwrap();
        carts.insert(session, cart);
        Ok(())
    }

    fn get(&self, session: CartSessionId) -> Result<Option<Cart>> {
        let carts = self.carts.read().unwrap();
        Ok(carts.get(&session).cloned())
    }

    fn clear(&self, session: CartSessionId) -> Result<()> {
        let mut carts = self.carts.write().unwrap();
        let cart = carts
            .get_mut(&session)
            .ok_or(HostError::CartNotFound(session))?;
        cart.items.clear();
        Ok(())
    }
}
