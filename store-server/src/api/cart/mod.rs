//! Cart API Module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::AppState;

/// Cart router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/cart", get(handler::get_cart))
        .route("/api/cart/items", post(handler::upsert_item))
}
