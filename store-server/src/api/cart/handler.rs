//! Cart API Handlers

use axum::{Json, extract::State};
use serde::Deserialize;
use shared::models::Cart;

use crate::api::UserId;
use crate::core::AppState;
use crate::utils::{AppError, AppResponse, AppResult, now_millis, ok};

/// Get the caller's cart
pub async fn get_cart(
    State(state): State<AppState>,
    UserId(user_id): UserId,
) -> AppResult<Json<AppResponse<Cart>>> {
    Ok(ok(state.carts.get(&user_id)))
}

/// Upsert line payload
#[derive(Debug, Deserialize)]
pub struct UpsertItemRequest {
    pub product_id: String,
    pub quantity: i64,
}

/// Insert or replace a cart line (last-write-wins per product id)
///
/// Validates that the product exists and has the requested quantity in
/// stock. Advisory only: availability is re-checked at checkout.
pub async fn upsert_item(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Json(payload): Json<UpsertItemRequest>,
) -> AppResult<Json<AppResponse<Cart>>> {
    if payload.quantity <= 0 {
        return Err(AppError::validation("quantity must be positive"));
    }

    let product = state
        .products
        .get(&payload.product_id)
        .ok_or_else(|| AppError::not_found(format!("Product {} not found", payload.product_id)))?;

    if !product.is_active {
        return Err(AppError::validation(format!(
            "Product {} is no longer available",
            product.name
        )));
    }
    if !product.in_stock(payload.quantity) {
        return Err(AppError::business_rule(format!(
            "Out of stock: {} has {}, requested {}",
            product.name, product.stock, payload.quantity
        )));
    }

    let cart = state
        .carts
        .upsert_line(&user_id, &payload.product_id, payload.quantity, now_millis());

    Ok(ok(cart))
}
