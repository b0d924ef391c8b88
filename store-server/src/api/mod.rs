//! API routes
//!
//! # Structure
//!
//! - [`health`] - liveness check
//! - [`cart`] - caller's cart (get, upsert line)
//! - [`checkout`] - order creation
//! - [`orders`] - order lookup and status
//! - [`webhook`] - payment gateway completion events
//! - [`reconciliation`] - reconciliation failure records (operator)
//!
//! Caller identity arrives as an `x-user-id` header set by the upstream
//! auth layer; credential verification itself is outside this service.

pub mod cart;
pub mod checkout;
pub mod health;
pub mod orders;
pub mod reconciliation;
pub mod webhook;

use axum::Router;
use axum::extract::FromRequestParts;
use http::request::Parts;
use tower_http::trace::TraceLayer;

use crate::core::AppState;
use crate::utils::AppError;

/// Authenticated caller identity from the `x-user-id` header.
pub struct UserId(pub String);

impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(|v| Self(v.to_string()))
            .ok_or(AppError::Unauthorized)
    }
}

/// Assemble the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(cart::router())
        .merge(checkout::router())
        .merge(orders::router())
        .merge(webhook::router())
        .merge(reconciliation::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
