//! Behalf Gateway
//!
//! The checkout finalization adapter. Payment collection and verification
//! happen entirely inside the Behalf-hosted widget; this gateway records the
//! order as awaiting manual verification, clears the cart, and hands the
//! customer back to the host.

use async_trait::async_trait;

use checkout_core::{
    CartStore, CheckoutContext, HostError, Order, OrderId, OrderStatus, OrderStore,
    PaymentGateway, PaymentOutcome, Result, StatusResolver,
};

use crate::config::BehalfConfig;
use crate::render::{render_instructions, EmailRecipient, Surface};
use crate::widget::render_widget;

/// Identifier this gateway registers under
pub const GATEWAY_ID: &str = "behalf_gateway";

/// Audit note attached to every Behalf order until a human verifies payment
pub const AUDIT_NOTE: &str = "Transaction to be checked.";

/// The Behalf net-terms/financing payment gateway
pub struct BehalfGateway {
    config: BehalfConfig,
}

impl BehalfGateway {
    pub fn new(config: BehalfConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BehalfConfig {
        &self.config
    }

    fn owns(&self, order: &Order) -> bool {
        order.payment_method == GATEWAY_ID
    }
}

impl StatusResolver for BehalfGateway {
    /// Override the host's candidate with the configured target status
    ///
    /// Orders paid through any other gateway pass through untouched.
    fn resolve_final_status(&self, candidate: OrderStatus, order: &Order) -> OrderStatus {
        if self.owns(order) {
            self.config.target_order_status
        } else {
            candidate
        }
    }

    fn audit_note(&self, order: &Order) -> Option<String> {
        self.owns(order).then(|| AUDIT_NOTE.to_string())
    }
}

#[async_trait]
impl PaymentGateway for BehalfGateway {
    fn id(&self) -> &str {
        GATEWAY_ID
    }

    fn title(&self) -> &str {
        &self.config.title
    }

    fn description(&self) -> Option<String> {
        Some(format!(
            r#"<p class="behalf-description">{}</p>"#,
            self.config.checkout_description
        ))
    }

    fn enabled(&self) -> bool {
        self.config.enabled
    }

    /// Finalize checkout without verifying the transaction
    ///
    /// Unconditional: the order gets the audit note, the session cart is
    /// cleared, and the customer is redirected to the order-received page.
    /// The only failure modes are a bad order reference or the host being
    /// down.
    async fn process_payment(
        &self,
        order_id: OrderId,
        ctx: &CheckoutContext,
    ) -> Result<PaymentOutcome> {
        let order = ctx
            .orders
            .get(order_id)?
            .ok_or(HostError::OrderNotFound(order_id))?;

        ctx.orders.append_note_once(order_id, AUDIT_NOTE)?;

        // An already-gone cart is not a checkout failure.
        match ctx.carts.clear(ctx.session) {
            Ok(()) | Err(HostError::CartNotFound(_)) => {}
            Err(err) => return Err(err),
        }

        tracing::info!(
            order_id = %order_id,
            gateway = GATEWAY_ID,
            "Checkout finalized, payment awaiting manual verification"
        );

        Ok(PaymentOutcome::success(ctx.urls.order_received(&order)))
    }

    fn payment_fields(&self) -> Option<String> {
        let mut fragment = String::new();
        if let Some(description) = self.description() {
            fragment.push_str(&description);
            fragment.push('\n');
        }
        fragment.push_str(&render_widget(&self.config));
        if !self.config.widget_instructions.is_empty() {
            fragment.push('\n');
            fragment.push_str(r#"<p class="behalf-instructions">"#);
            fragment.push_str(&render_instructions(Surface::WidgetArea, &self.config));
            fragment.push_str("</p>");
        }
        Some(fragment)
    }

    fn thankyou_text(&self) -> Option<String> {
        let text = render_instructions(Surface::ThankYouPage, &self.config);
        (!text.is_empty()).then_some(text)
    }

    fn email_instructions(&self, order: &Order, sent_to_admin: bool) -> Option<String> {
        let recipient = if sent_to_admin {
            EmailRecipient::Admin
        } else {
            EmailRecipient::Customer
        };
        let text = render_instructions(Surface::OrderEmail { order, recipient }, &self.config);
        (!text.is_empty()).then_some(text)
    }
}
