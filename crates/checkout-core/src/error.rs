//! Error Types

use thiserror::Error;

use crate::order::OrderId;

/// Result type alias for host-side operations
pub type Result<T> = std::result::Result<T, HostError>;

/// Errors surfaced by the host commerce system
#[derive(Error, Debug)]
pub enum HostError {
    /// Order reference does not exist
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// Host persistence layer failed
    #[error("Host unavailable: {0}")]
    HostUnavailable(String),

    /// No gateway registered under the given identifier
    #[error("Gateway not found: {0}")]
    GatewayNotFound(String),

    /// Status slug outside the host's known status set
    #[error("Unknown order status: {0}")]
    UnknownStatus(String),

    /// Cart session does not exist
    #[error("Cart not found for session {0}")]
    CartNotFound(uuid::Uuid),
}

impl HostError {
    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, HostError::HostUnavailable(_))
    }

    /// Convert to a customer-facing message
    pub fn user_message(&self) -> &'static str {
        match self {
            HostError::OrderNotFound(_) => "We could not find that order.",
            HostError::HostUnavailable(_) => {
                "The store is temporarily unavailable. Please try again."
            }
            HostError::GatewayNotFound(_) => "The selected payment method is not available.",
            HostError::UnknownStatus(_) => "The store configuration is invalid.",
            HostError::CartNotFound(_) => "Your shopping session has expired.",
        }
    }
}
