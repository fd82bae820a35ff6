//! Gateway Error Types

use thiserror::Error;

use checkout_core::HostError;

/// Result type alias
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Behalf gateway errors
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Host commerce system failure
    #[error(transparent)]
    Host(#[from] HostError),

    /// Settings rejected at validation time, never at checkout time
    #[error("Invalid gateway configuration: {0}")]
    InvalidConfig(String),
}

impl GatewayError {
    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            GatewayError::Host(err) => err.is_retryable(),
            GatewayError::InvalidConfig(_) => false,
        }
    }

    /// Convert to a customer-facing message
    pub fn user_message(&self) -> &'static str {
        match self {
            GatewayError::Host(err) => err.user_message(),
            GatewayError::InvalidConfig(_) => {
                "This payment method is misconfigured. Please contact the store."
            }
        }
    }
}
