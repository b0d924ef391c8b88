//! Order API Module
//!
//! Read-only access to orders. All mutations go through checkout and the
//! reconciliation handler.

mod handler;

use axum::{Router, routing::get};

use crate::core::AppState;

/// Order router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/orders", get(handler::list))
        .route("/api/orders/{id}", get(handler::get_by_id))
        .route("/api/orders/{id}/status", get(handler::get_status))
}
