//! Order snapshot - immutable pricing state plus a mutable status
//!
//! Everything except `status` and the payment-session fields is frozen at
//! creation time. `order_price`/`final_price` are computed by the pricing
//! engine from the frozen lines and coupon snapshot, never recomputed from
//! live catalog data.

use serde::{Deserialize, Serialize};

use super::types::{CouponSnapshot, OrderLine, PaymentMethod, ShippingAddress};

/// Order status
///
/// `PENDING -> PLACED` and `PENDING -> CANCELLED`; both targets are
/// terminal. Creation always yields `PENDING` regardless of payment method.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Placed,
    Cancelled,
}

impl OrderStatus {
    /// Terminal states admit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Placed | Self::Cancelled)
    }
}

/// Order - created once per checkout attempt
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub order_id: String,
    pub user_id: String,
    /// Frozen line items captured at creation
    pub lines: Vec<OrderLine>,
    /// Frozen coupon terms; absent when no coupon was applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon: Option<CouponSnapshot>,
    /// Sum of final_unit_price x quantity, pre-coupon
    pub order_price: f64,
    /// Order price after coupon application (never negative)
    pub final_price: f64,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    pub address: ShippingAddress,
    /// Gateway checkout session, set once a card session is created
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Creation timestamp (epoch millis)
    pub created_at: i64,
    /// Last status change (epoch millis)
    pub updated_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(OrderStatus::Placed.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&OrderStatus::Pending).unwrap();
        assert_eq!(json, "\"PENDING\"");
        let back: OrderStatus = serde_json::from_str("\"PLACED\"").unwrap();
        assert_eq!(back, OrderStatus::Placed);
    }
}
