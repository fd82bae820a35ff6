//! # checkout-behalf
//!
//! Behalf net-terms/financing payment gateway for the checkout host.
//!
//! ## How payment actually happens
//!
//! The customer completes financing signup inside the Behalf-hosted widget,
//! loaded client-side from Behalf's SDK. This crate never talks to Behalf
//! server-side and performs no capture or verification:
//!
//! ```text
//! ┌─────────────┐     ┌──────────────────┐     ┌─────────────────────┐
//! │  Checkout   │────▶│  Behalf widget   │────▶│  Order held in the  │
//! │  (widget)   │     │  (remote SDK)    │     │  configured status  │
//! └─────────────┘     └──────────────────┘     └─────────────────────┘
//! ```
//!
//! Checkout finalization is unconditional: the order is marked with an audit
//! note ("Transaction to be checked."), the cart is cleared, and the order
//! sits in the configured pending-equivalent status until a human verifies
//! the payment on the Behalf side.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use checkout_behalf::{BehalfGateway, BehalfSettings};
//!
//! let config = BehalfSettings::from_env().validate()?;
//! let gateway = BehalfGateway::new(config);
//!
//! // Register into the host's gateway registry at startup:
//! registry.register(std::sync::Arc::new(gateway));
//! ```

mod config;
mod error;
mod gateway;
mod render;
mod widget;

pub use config::{BehalfConfig, BehalfSettings};
pub use error::{GatewayError, Result};
pub use gateway::{BehalfGateway, AUDIT_NOTE, GATEWAY_ID};
pub use render::{autop, render_instructions, EmailRecipient, Surface};
pub use widget::{render_widget, WidgetConfig, SDK_URL, WIDGET_ELEMENT_ID};
