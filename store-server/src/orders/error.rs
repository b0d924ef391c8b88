use shared::order::OrderStatus;
use thiserror::Error;

/// Ledger errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Order {order_id} is {status:?}; no transition out of a terminal state")]
    TerminalState {
        order_id: String,
        status: OrderStatus,
    },
}
