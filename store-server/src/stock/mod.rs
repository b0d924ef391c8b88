//! Stock guard
//!
//! Two operations with different timing and failure tolerance:
//! - pre-check at order creation (advisory, fail-fast, no mutation)
//! - commit at reconciliation (authoritative conditional decrement)

pub mod guard;

pub use guard::{CommitConflict, StockError, commit_decrements, precheck};
