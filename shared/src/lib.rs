//! Shared types for the storefront backend
//!
//! Domain models and order types used by the server and exposed to API
//! consumers: products, coupons, carts, and the immutable order snapshot
//! with its status state machine.

pub mod models;
pub mod order;

// Re-exports
pub use serde::{Deserialize, Serialize};
