//! Checkout API Module

mod handler;

use axum::{Router, routing::post};

use crate::core::AppState;

/// Checkout router
pub fn router() -> Router<AppState> {
    Router::new().route("/api/checkout", post(handler::create_order))
}
