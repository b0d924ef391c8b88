//! OrderLedger - order creation and status transitions
//!
//! # Mutation discipline
//!
//! Orders live in a sharded map; every status change runs inside the
//! order's entry with a status guard, so concurrent transitions against the
//! same order serialize and exactly one caller wins `PENDING -> PLACED`.
//! There is no global lock and no reliance on request ordering.
//!
//! Every transition appends a [`StatusTransition`] record (order id,
//! previous status, new status, triggering event id) and emits a structured
//! log line, enough to reconstruct history and audit idempotency guards.

use dashmap::DashMap;
use parking_lot::RwLock;
use shared::order::{
    CouponSnapshot, Order, OrderLine, OrderStatus, PaymentMethod, ShippingAddress,
    StatusTransition,
};

use super::LedgerError;
use crate::utils::now_millis;

/// Input for order creation: everything the pricing engine and checkout
/// validation already froze.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub user_id: String,
    pub lines: Vec<OrderLine>,
    pub coupon: Option<CouponSnapshot>,
    pub order_price: f64,
    pub final_price: f64,
    pub payment_method: PaymentMethod,
    pub address: ShippingAddress,
}

/// Outcome of `mark_placed`
#[derive(Debug, Clone, PartialEq)]
pub enum Placement {
    /// This call won the PENDING -> PLACED transition
    Transitioned(Order),
    /// The order was already PLACED; treated as success, no mutation
    AlreadyPlaced(Order),
}

#[derive(Debug, Default)]
pub struct OrderLedger {
    orders: DashMap<String, Order>,
    transitions: RwLock<Vec<StatusTransition>>,
}

impl OrderLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a PENDING order from a draft. Creation always yields PENDING
    /// regardless of payment method; placement is a separate transition.
    pub fn create_order(&self, draft: OrderDraft) -> Order {
        let now = now_millis();
        let order = Order {
            order_id: uuid::Uuid::new_v4().to_string(),
            user_id: draft.user_id,
            lines: draft.lines,
            coupon: draft.coupon,
            order_price: draft.order_price,
            final_price: draft.final_price,
            payment_method: draft.payment_method,
            status: OrderStatus::Pending,
            address: draft.address,
            session_id: None,
            created_at: now,
            updated_at: now,
        };
        tracing::info!(
            order_id = %order.order_id,
            user_id = %order.user_id,
            final_price = order.final_price,
            payment_method = ?order.payment_method,
            "Order created"
        );
        self.orders.insert(order.order_id.clone(), order.clone());
        order
    }

    pub fn get(&self, order_id: &str) -> Option<Order> {
        self.orders.get(order_id).map(|o| o.clone())
    }

    pub fn status(&self, order_id: &str) -> Option<OrderStatus> {
        self.orders.get(order_id).map(|o| o.status)
    }

    pub fn list_for_user(&self, user_id: &str) -> Vec<Order> {
        let mut orders: Vec<Order> = self
            .orders
            .iter()
            .filter(|o| o.user_id == user_id)
            .map(|o| o.clone())
            .collect();
        orders.sort_by_key(|o| o.created_at);
        orders
    }

    /// Record the gateway session on a pending order.
    pub fn attach_session(&self, order_id: &str, session_id: &str) -> Result<Order, LedgerError> {
        let mut entry = self
            .orders
            .get_mut(order_id)
            .ok_or_else(|| LedgerError::OrderNotFound(order_id.to_string()))?;
        entry.session_id = Some(session_id.to_string());
        entry.updated_at = now_millis();
        Ok(entry.clone())
    }

    /// Transition `PENDING -> PLACED`, guarded by the order's current
    /// status under the entry lock.
    ///
    /// - already `PLACED` => `AlreadyPlaced` (idempotent success)
    /// - `CANCELLED` => terminal-state error
    /// - unknown order => not-found error
    pub fn mark_placed(
        &self,
        order_id: &str,
        event_id: Option<&str>,
    ) -> Result<Placement, LedgerError> {
        let mut entry = self
            .orders
            .get_mut(order_id)
            .ok_or_else(|| LedgerError::OrderNotFound(order_id.to_string()))?;

        match entry.status {
            OrderStatus::Placed => Ok(Placement::AlreadyPlaced(entry.clone())),
            OrderStatus::Cancelled => Err(LedgerError::TerminalState {
                order_id: order_id.to_string(),
                status: OrderStatus::Cancelled,
            }),
            OrderStatus::Pending => {
                entry.status = OrderStatus::Placed;
                entry.updated_at = now_millis();
                self.log_transition(
                    order_id,
                    OrderStatus::Pending,
                    OrderStatus::Placed,
                    event_id,
                    entry.updated_at,
                );
                Ok(Placement::Transitioned(entry.clone()))
            }
        }
    }

    /// Transition `PENDING -> CANCELLED`.
    pub fn mark_cancelled(&self, order_id: &str) -> Result<Order, LedgerError> {
        let mut entry = self
            .orders
            .get_mut(order_id)
            .ok_or_else(|| LedgerError::OrderNotFound(order_id.to_string()))?;

        if entry.status.is_terminal() {
            return Err(LedgerError::TerminalState {
                order_id: order_id.to_string(),
                status: entry.status,
            });
        }

        entry.status = OrderStatus::Cancelled;
        entry.updated_at = now_millis();
        self.log_transition(
            order_id,
            OrderStatus::Pending,
            OrderStatus::Cancelled,
            None,
            entry.updated_at,
        );
        Ok(entry.clone())
    }

    /// Transition history for one order.
    pub fn transitions_for(&self, order_id: &str) -> Vec<StatusTransition> {
        self.transitions
            .read()
            .iter()
            .filter(|t| t.order_id == order_id)
            .cloned()
            .collect()
    }

    fn log_transition(
        &self,
        order_id: &str,
        from: OrderStatus,
        to: OrderStatus,
        event_id: Option<&str>,
        at: i64,
    ) {
        tracing::info!(
            order_id = %order_id,
            from = ?from,
            to = ?to,
            event_id = event_id.unwrap_or("-"),
            "Order status transition"
        );
        self.transitions.write().push(StatusTransition {
            order_id: order_id.to_string(),
            from,
            to,
            event_id: event_id.map(String::from),
            at,
        });
    }
}
