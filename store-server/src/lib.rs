//! store-server — Storefront checkout and payment reconciliation service
//!
//! Converts a mutable shopping cart into an immutable priced order,
//! optionally creates a hosted payment session, and reconciles
//! asynchronous at-least-once completion events against order, cart and
//! stock state.
//!
//! # Control flow
//!
//! ```text
//! client -> checkout service
//!     ├─ pricing engine + stock pre-check
//!     ├─ order ledger (create PENDING order)
//!     └─ payment gateway (card: hosted session)
//! gateway -> webhook -> reconciliation handler
//!     ├─ order ledger (PENDING -> PLACED, status-guarded)
//!     ├─ cart store (clear)
//!     └─ stock guard (conditional decrement)
//! ```

pub mod api;
pub mod core;
pub mod gateway;
pub mod orders;
pub mod pricing;
pub mod services;
pub mod stock;
pub mod store;
pub mod utils;
