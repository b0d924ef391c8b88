//! Order Module
//!
//! The immutable order snapshot and its status state machine:
//! - Types: payment method, frozen line items, coupon snapshot, address
//! - Snapshot: the order record created once per checkout attempt
//! - Transitions: append-only status transition records

pub mod snapshot;
pub mod types;

// Re-exports
pub use snapshot::{Order, OrderStatus};
pub use types::{CouponSnapshot, OrderLine, PaymentMethod, ShippingAddress, StatusTransition};
