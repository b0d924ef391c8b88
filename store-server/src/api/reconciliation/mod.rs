//! Reconciliation API Module
//!
//! Operator visibility into reconciliation failures. Read-only: records are
//! produced by the reconciliation handler.

mod handler;

use axum::{Router, routing::get};

use crate::core::AppState;

/// Reconciliation router
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/api/reconciliation/failures",
        get(handler::list_failures),
    )
}
