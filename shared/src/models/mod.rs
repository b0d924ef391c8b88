//! Data models
//!
//! Entities consumed by the checkout subsystem. Catalog management itself
//! (CRUD, images, reviews) lives upstream; these are the read shapes the
//! server works with. All IDs are `String`, timestamps are epoch millis.

pub mod cart;
pub mod coupon;
pub mod product;

// Re-exports
pub use cart::*;
pub use coupon::*;
pub use product::*;
