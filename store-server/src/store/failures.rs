//! Reconciliation failure records
//!
//! Once an order is PLACED, a failing follow-up step (cart clear, stock
//! decrement) or an anomalous event (unknown/cancelled order) cannot be
//! surfaced to any live caller; the triggering request has long returned.
//! These records are the operator-visible trail. A log line alone is not
//! enough because redelivery of the same event must not be assumed.

use parking_lot::RwLock;
use serde::Serialize;
use shared::order::OrderStatus;

/// Which reconciliation step failed
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureStage {
    /// Event referenced an order the ledger does not know
    OrderNotFound,
    /// Event arrived for an order already in a terminal non-placed state
    OrderCancelled,
    /// Stock decrement returned a conflict or missing product
    StockDecrement,
}

/// One reconciliation failure, durable and inspectable
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReconciliationFailure {
    pub order_id: String,
    pub event_id: String,
    pub stage: FailureStage,
    /// Order status observed at failure time, if the order exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_status: Option<OrderStatus>,
    pub detail: String,
    /// Record timestamp (epoch millis)
    pub at: i64,
}

#[derive(Debug, Default)]
pub struct ReconciliationFailureStore {
    records: RwLock<Vec<ReconciliationFailure>>,
}

impl ReconciliationFailureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, failure: ReconciliationFailure) {
        tracing::error!(
            order_id = %failure.order_id,
            event_id = %failure.event_id,
            stage = ?failure.stage,
            detail = %failure.detail,
            "Reconciliation failure recorded"
        );
        self.records.write().push(failure);
    }

    pub fn list(&self) -> Vec<ReconciliationFailure> {
        self.records.read().clone()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}
