//! Order Model
//!
//! Host-owned order records: identifier, status lifecycle, payment method,
//! and the append-only audit trail.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Host-assigned numeric order identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(u64);

impl OrderId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Order status lifecycle
///
/// The host's closed status set. Gateways pick a value from this set and
/// never invent new ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Pending,
    Processing,
    OnHold,
    Completed,
    Cancelled,
    Refunded,
    Failed,
}

impl OrderStatus {
    /// Every status the host knows, in lifecycle order
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::OnHold,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
        OrderStatus::Refunded,
        OrderStatus::Failed,
    ];

    /// Canonical prefixed slug, as persisted in host settings
    pub fn slug(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "wc-pending",
            OrderStatus::Processing => "wc-processing",
            OrderStatus::OnHold => "wc-on-hold",
            OrderStatus::Completed => "wc-completed",
            OrderStatus::Cancelled => "wc-cancelled",
            OrderStatus::Refunded => "wc-refunded",
            OrderStatus::Failed => "wc-failed",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending payment",
            OrderStatus::Processing => "Processing",
            OrderStatus::OnHold => "On hold",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Refunded => "Refunded",
            OrderStatus::Failed => "Failed",
        }
    }

    /// Parse a settings slug, with or without the host prefix
    pub fn from_slug(slug: &str) -> Option<Self> {
        let bare = slug.strip_prefix("wc-").unwrap_or(slug);
        match bare {
            "pending" | "pending-payment" => Some(OrderStatus::Pending),
            "processing" => Some(OrderStatus::Processing),
            "on-hold" => Some(OrderStatus::OnHold),
            "completed" => Some(OrderStatus::Completed),
            "cancelled" => Some(OrderStatus::Cancelled),
            "refunded" => Some(OrderStatus::Refunded),
            "failed" => Some(OrderStatus::Failed),
            _ => None,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = crate::error::HostError;

    fn from_str(slug: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_slug(slug)
            .ok_or_else(|| crate::error::HostError::UnknownStatus(slug.to_string()))
    }
}

/// A single entry in an order's audit trail
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OrderNote {
    /// Note text
    pub content: String,

    /// When the note was appended
    pub added_at: DateTime<Utc>,
}

impl OrderNote {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            added_at: Utc::now(),
        }
    }
}

/// A host-owned order record
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Order {
    /// Host-assigned identifier
    pub id: OrderId,

    /// Current lifecycle status
    pub status: OrderStatus,

    /// Identifier of the gateway taking payment
    pub payment_method: String,

    /// ISO currency code
    pub currency: String,

    /// Order total
    pub total: Decimal,

    /// Append-only audit trail
    pub notes: Vec<OrderNote>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Create a new order awaiting payment
    pub fn new(
        id: OrderId,
        payment_method: impl Into<String>,
        currency: impl Into<String>,
        total: Decimal,
    ) -> Self {
        Self {
            id,
            status: OrderStatus::Pending,
            payment_method: payment_method.into(),
            currency: currency.into(),
            total,
            notes: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Check the current status
    pub fn has_status(&self, status: OrderStatus) -> bool {
        self.status == status
    }

    /// Whether a note with identical content is already on the trail
    pub fn has_note(&self, content: &str) -> bool {
        self.notes.iter().any(|note| note.content == content)
    }

    /// Append to the audit trail
    pub fn add_note(&mut self, content: impl Into<String>) {
        self.notes.push(OrderNote::new(content));
    }
}
