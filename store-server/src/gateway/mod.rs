//! Payment session gateway
//!
//! The checkout core consumes the gateway through two contracts only:
//! session creation ([`PaymentGateway::create_session`]) and inbound
//! completion events (verified by [`signature::verify_webhook_signature`]
//! before they reach reconciliation). A failed or timed-out session
//! creation must leave the order PENDING.

pub mod signature;
pub mod stripe;

use async_trait::async_trait;
use shared::order::Order;
use thiserror::Error;

pub use stripe::StripeGateway;

/// Gateway errors
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("gateway request failed: {0}")]
    Request(String),

    #[error("gateway response missing field: {0}")]
    MalformedResponse(&'static str),
}

/// A hosted checkout session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    pub session_id: String,
    pub redirect_url: String,
}

/// Session creation seam
///
/// One concrete implementation talks to the real provider; tests substitute
/// their own. This is intentionally a single-operation seam, not a
/// multi-provider abstraction.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a hosted checkout session for a frozen order snapshot.
    async fn create_session(&self, order: &Order) -> Result<CheckoutSession, GatewayError>;
}
