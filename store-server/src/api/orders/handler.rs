//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use shared::order::{Order, OrderStatus};

use crate::api::UserId;
use crate::core::AppState;
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// List the caller's orders
pub async fn list(
    State(state): State<AppState>,
    UserId(user_id): UserId,
) -> AppResult<Json<AppResponse<Vec<Order>>>> {
    Ok(ok(state.ledger.list_for_user(&user_id)))
}

/// Get one of the caller's orders by id
pub async fn get_by_id(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Order>>> {
    let order = state
        .ledger
        .get(&id)
        .filter(|o| o.user_id == user_id)
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;
    Ok(ok(order))
}

/// Order status payload
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub order_id: String,
    pub status: OrderStatus,
}

/// Get an order's status
pub async fn get_status(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<StatusResponse>>> {
    let order = state
        .ledger
        .get(&id)
        .filter(|o| o.user_id == user_id)
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;
    Ok(ok(StatusResponse {
        order_id: order.order_id,
        status: order.status,
    }))
}
