//! Processed payment-event set
//!
//! Insert-first dedup for at-least-once webhook delivery: the first caller
//! to record an event id wins, replays observe `false`. This is a fast path
//! only; the durable idempotency boundary is the order's status, so a
//! redelivery after restart (empty set) still reconciles to a no-op.

use dashmap::DashSet;

#[derive(Debug, Default)]
pub struct ProcessedEventStore {
    seen: DashSet<String>,
}

impl ProcessedEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event id. Returns `true` if this is the first time the id
    /// was seen.
    pub fn mark_processed(&self, event_id: &str) -> bool {
        self.seen.insert(event_id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_insert_wins() {
        let store = ProcessedEventStore::new();
        assert!(store.mark_processed("evt_1"));
        assert!(!store.mark_processed("evt_1"));
        assert!(store.mark_processed("evt_2"));
    }
}
