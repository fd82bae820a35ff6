//! # checkout-core
//!
//! Host-side commerce model for the checkout gateway workspace: orders and
//! their status lifecycle, cart sessions, storage seams, and the capability
//! traits a payment gateway plugs into.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Host checkout                          │
//! │  ┌──────────────┐  ┌──────────────┐  ┌────────────────────┐  │
//! │  │   Gateway    │  │    Status    │  │  OrderStore /      │  │
//! │  │   Registry   │──│   Pipeline   │──│  CartStore         │  │
//! │  └──────────────┘  └──────────────┘  └────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `PaymentGateway` trait lets the host swap payment methods without
//! changing checkout logic; the `StatusResolver` capability is how a gateway
//! overrides the status the host would otherwise assign after payment.

pub mod cart;
pub mod error;
pub mod gateway;
pub mod order;
pub mod status;
pub mod store;
pub mod urls;

pub use cart::{Cart, CartItem, CartSessionId, CartStore, MemoryCartStore};
pub use error::{HostError, Result};
pub use gateway::{CheckoutContext, GatewayRegistry, PaymentGateway, PaymentOutcome, PaymentResult};
pub use order::{Order, OrderId, OrderNote, OrderStatus};
pub use status::{StatusPipeline, StatusResolver};
pub use store::{MemoryOrderStore, OrderStore};
pub use urls::ReturnUrls;
