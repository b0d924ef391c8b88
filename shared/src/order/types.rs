//! Shared types for the order lifecycle

use serde::{Deserialize, Serialize};

use super::OrderStatus;

/// How the order is paid
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// Settled on delivery; no gateway session
    #[default]
    Cash,
    /// Hosted checkout session via the payment gateway
    Card,
}

/// Frozen order line - captured from the product at order-creation time
///
/// Later product edits (price, discount, name) never change this record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    pub product_id: String,
    pub name: String,
    /// Unit price before product discount
    pub unit_price: f64,
    /// Product discount in percent at capture time
    pub discount_percent: f64,
    /// Unit price after product discount, rounded to 2dp
    pub final_unit_price: f64,
    pub quantity: i64,
}

/// Frozen coupon terms - captured at order-creation time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CouponSnapshot {
    pub coupon_id: String,
    pub code: String,
    pub kind: crate::models::DiscountKind,
    pub value: f64,
}

/// Delivery address captured at checkout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShippingAddress {
    pub phone: String,
    pub street: String,
}

/// One status transition, enough to reconstruct order history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusTransition {
    pub order_id: String,
    pub from: OrderStatus,
    pub to: OrderStatus,
    /// Payment event that triggered the transition, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    /// Transition timestamp (epoch millis)
    pub at: i64,
}
