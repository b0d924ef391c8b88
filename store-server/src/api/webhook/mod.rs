//! Payment webhook API Module

mod handler;

use axum::{Router, routing::post};

use crate::core::AppState;

/// Webhook router
pub fn router() -> Router<AppState> {
    Router::new().route("/api/payments/webhook", post(handler::handle_webhook))
}
