//! Checkout API Handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use shared::order::{Order, PaymentMethod};

use crate::api::UserId;
use crate::core::AppState;
use crate::services::checkout::{self, CheckoutRequest};
use crate::utils::{AppResponse, AppResult, ok};

/// Checkout payload
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub coupon_code: Option<String>,
    pub phone: String,
    pub street: String,
}

/// Checkout response: the order plus, for card payments, the redirect target
#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    pub order: Order,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
}

/// Create an order from the caller's cart
pub async fn create_order(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<AppResponse<CreateOrderResponse>>> {
    let outcome = checkout::create_order(
        &state,
        &user_id,
        CheckoutRequest {
            payment_method: payload.payment_method,
            coupon_code: payload.coupon_code,
            phone: payload.phone,
            street: payload.street,
        },
    )
    .await?;

    Ok(ok(CreateOrderResponse {
        order: outcome.order,
        redirect_url: outcome.redirect_url,
    }))
}
