//! In-process stores
//!
//! Entity persistence is owned upstream; these stores stand at that seam.
//! Each is a sharded concurrent map with per-entry mutation discipline and
//! no global lock.
//!
//! - [`products`] - product catalog with atomic conditional stock decrement
//! - [`carts`] - per-user carts (upsert/clear)
//! - [`coupons`] - coupon catalog keyed by code
//! - [`events`] - processed payment-event set (webhook dedup fast path)
//! - [`failures`] - durable reconciliation failure records

pub mod carts;
pub mod coupons;
pub mod events;
pub mod failures;
pub mod products;

pub use carts::CartStore;
pub use coupons::CouponCatalog;
pub use events::ProcessedEventStore;
pub use failures::{FailureStage, ReconciliationFailure, ReconciliationFailureStore};
pub use products::{DecrementOutcome, ProductCatalog};
