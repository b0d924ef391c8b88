//! Payment reconciliation
//!
//! Consumes completion events exactly-once-in-effect. The durable
//! idempotency boundary is the order's status: only the caller that wins
//! `PENDING -> PLACED` runs the follow-up steps (cart clear, stock
//! commit), so a replayed event (same id, or a fresh id for the same
//! order) produces no additional side effect.
//!
//! Reconciliation never depends on in-process state from the creating
//! request: everything is read back from the stores by id, so an event
//! redelivered to a freshly restarted instance reconciles identically.

use shared::order::Order;

use crate::core::AppState;
use crate::orders::{LedgerError, Placement};
use crate::stock;
use crate::store::{FailureStage, ReconciliationFailure};
use crate::utils::now_millis;

/// Outcome of handling one completion event
#[derive(Debug, Clone, PartialEq)]
pub enum ReconcileOutcome {
    /// This event won the transition; follow-up steps ran
    Placed(Order),
    /// Replay of an already-reconciled event or order; success, no mutation
    Duplicate,
    /// Event for an unknown or cancelled order; recorded, not retried
    Anomaly,
}

/// Handle a verified `checkout.session.completed` event.
pub fn handle_completion(state: &AppState, order_id: &str, event_id: &str) -> ReconcileOutcome {
    // Fast-path dedup on the event id. Best-effort only: the status guard
    // below is what actually makes replays safe after a restart.
    if !state.processed_events.mark_processed(event_id) {
        tracing::info!(event_id = %event_id, "Duplicate completion event, skipping");
        return ReconcileOutcome::Duplicate;
    }

    match state.ledger.mark_placed(order_id, Some(event_id)) {
        Ok(Placement::Transitioned(order)) => {
            finalize_placed(state, &order, event_id);
            ReconcileOutcome::Placed(order)
        }
        Ok(Placement::AlreadyPlaced(_)) => {
            tracing::info!(
                order_id = %order_id,
                event_id = %event_id,
                "Completion event for already-placed order, no-op"
            );
            ReconcileOutcome::Duplicate
        }
        Err(LedgerError::OrderNotFound(_)) => {
            state.failures.record(ReconciliationFailure {
                order_id: order_id.to_string(),
                event_id: event_id.to_string(),
                stage: FailureStage::OrderNotFound,
                order_status: None,
                detail: "completion event references an unknown order".to_string(),
                at: now_millis(),
            });
            ReconcileOutcome::Anomaly
        }
        Err(LedgerError::TerminalState { status, .. }) => {
            state.failures.record(ReconciliationFailure {
                order_id: order_id.to_string(),
                event_id: event_id.to_string(),
                stage: FailureStage::OrderCancelled,
                order_status: Some(status),
                detail: "completion event for a cancelled order".to_string(),
                at: now_millis(),
            });
            ReconcileOutcome::Anomaly
        }
    }
}

/// Follow-up steps after an order reaches PLACED: clear the user's cart and
/// commit stock decrements from the frozen lines.
///
/// Runs exactly once per order (the caller holds the transition win). Any
/// decrement conflict is recorded for operator remediation: the order is
/// already PLACED, so there is no rollback, and redelivery of the event
/// cannot be assumed to repair it.
pub fn finalize_placed(state: &AppState, order: &Order, event_id: &str) {
    state.carts.clear(&order.user_id, now_millis());
    tracing::info!(
        order_id = %order.order_id,
        user_id = %order.user_id,
        "Cart cleared after placement"
    );

    for conflict in stock::commit_decrements(&state.products, &order.lines) {
        state.failures.record(ReconciliationFailure {
            order_id: order.order_id.clone(),
            event_id: event_id.to_string(),
            stage: FailureStage::StockDecrement,
            order_status: Some(order.status),
            detail: format!("{}: {}", conflict.product_id, conflict.detail),
            at: now_millis(),
        });
    }
}
