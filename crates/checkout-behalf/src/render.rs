//! Instruction Rendering
//!
//! Human-readable content for the three presentation surfaces: the
//! order-received page, the order confirmation email, and the checkout
//! widget area.

use checkout_core::Order;

use crate::config::BehalfConfig;
use crate::gateway::GATEWAY_ID;

/// Who a transactional email is addressed to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmailRecipient {
    Customer,
    Admin,
}

/// Presentation surface requesting instruction content
#[derive(Clone, Copy, Debug)]
pub enum Surface<'a> {
    /// Order-received page shown right after checkout
    ThankYouPage,

    /// Order confirmation email
    OrderEmail {
        order: &'a Order,
        recipient: EmailRecipient,
    },

    /// Checkout area under the payment widget
    WidgetArea,
}

/// Render instruction content for a surface
///
/// Email content is customer-facing only: it renders solely when the order
/// was paid through this gateway and still carries the configured
/// pending-equivalent status. Everything else gets an empty string.
pub fn render_instructions(surface: Surface<'_>, config: &BehalfConfig) -> String {
    match surface {
        Surface::ThankYouPage => autop(&config.email_instructions),
        Surface::OrderEmail { order, recipient } => {
            let customer_facing = recipient == EmailRecipient::Customer;
            if customer_facing
                && order.payment_method == GATEWAY_ID
                && order.has_status(config.target_order_status)
            {
                autop(&config.email_instructions)
            } else {
                String::new()
            }
        }
        Surface::WidgetArea => config.widget_instructions.clone(),
    }
}

/// Wrap blank-line-separated blocks in paragraph tags, newlines in breaks
///
/// The host's auto-paragraph convention for operator-entered text.
pub fn autop(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n");
    let mut out = String::new();
    for block in normalized.split("\n\n") {
        let block = block.trim();
        if block.is_empty() {
            continue;
        }
        out.push_str("<p>");
        out.push_str(&block.replace('\n', "<br />\n"));
        out.push_str("</p>\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::{OrderId, OrderStatus};
    use rust_decimal_macros::dec;

    fn behalf_order(status: OrderStatus) -> Order {
        let mut order = Order::new(OrderId::new(7), GATEWAY_ID, "USD", dec!(320.00));
        order.status = status;
        order
    }

    fn config() -> BehalfConfig {
        BehalfConfig {
            email_instructions: "Payment is being verified.".into(),
            target_order_status: OrderStatus::Pending,
            ..Default::default()
        }
    }

    #[test]
    fn test_autop_paragraphs_and_breaks() {
        assert_eq!(
            autop("First block.\nStill first.\n\nSecond block."),
            "<p>First block.<br />\nStill first.</p>\n<p>Second block.</p>\n"
        );
        assert_eq!(autop(""), "");
        assert_eq!(autop("  \n\n  "), "");
    }

    #[test]
    fn test_thankyou_page_renders_instructions() {
        assert_eq!(
            render_instructions(Surface::ThankYouPage, &config()),
            "<p>Payment is being verified.</p>\n"
        );
    }

    #[test]
    fn test_email_renders_when_all_gates_hold() {
        let order = behalf_order(OrderStatus::Pending);
        let html = render_instructions(
            Surface::OrderEmail {
                order: &order,
                recipient: EmailRecipient::Customer,
            },
            &config(),
        );
        assert_eq!(html, "<p>Payment is being verified.</p>\n");
    }

    #[test]
    fn test_email_empty_for_admin_recipient() {
        let order = behalf_order(OrderStatus::Pending);
        let html = render_instructions(
            Surface::OrderEmail {
                order: &order,
                recipient: EmailRecipient::Admin,
            },
            &config(),
        );
        assert!(html.is_empty());
    }

    #[test]
    fn test_email_empty_for_other_gateway() {
        let mut order = behalf_order(OrderStatus::Pending);
        order.payment_method = "other_gateway".into();
        let html = render_instructions(
            Surface::OrderEmail {
                order: &order,
                recipient: EmailRecipient::Customer,
            },
            &config(),
        );
        assert!(html.is_empty());
    }

    #[test]
    fn test_email_empty_once_order_leaves_pending_status() {
        let order = behalf_order(OrderStatus::Completed);
        let html = render_instructions(
            Surface::OrderEmail {
                order: &order,
                recipient: EmailRecipient::Customer,
            },
            &config(),
        );
        assert!(html.is_empty());
    }

    #[test]
    fn test_email_gate_follows_configured_status() {
        // Target re-configured to on-hold: the gate moves with it.
        let config = BehalfConfig {
            target_order_status: OrderStatus::OnHold,
            ..config()
        };

        let on_hold = behalf_order(OrderStatus::OnHold);
        let html = render_instructions(
            Surface::OrderEmail {
                order: &on_hold,
                recipient: EmailRecipient::Customer,
            },
            &config,
        );
        assert!(!html.is_empty());

        let pending = behalf_order(OrderStatus::Pending);
        let html = render_instructions(
            Surface::OrderEmail {
                order: &pending,
                recipient: EmailRecipient::Customer,
            },
            &config,
        );
        assert!(html.is_empty());
    }

    #[test]
    fn test_widget_area_returns_instructions_verbatim() {
        let config = BehalfConfig {
            widget_instructions: "Log in, then continue.".into(),
            ..Default::default()
        };
        assert_eq!(
            render_instructions(Surface::WidgetArea, &config),
            "Log in, then continue."
        );
    }
}
