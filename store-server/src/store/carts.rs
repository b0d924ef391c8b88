//! Cart store
//!
//! One cart per user. Mutations run inside the user's map entry, so
//! concurrent upserts serialize with last-write-wins semantics per product
//! id. Carts are cleared, never deleted.

use dashmap::DashMap;
use shared::models::Cart;

#[derive(Debug, Default)]
pub struct CartStore {
    carts: DashMap<String, Cart>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The user's cart, or an empty one if they have none yet.
    pub fn get(&self, user_id: &str) -> Cart {
        self.carts
            .get(user_id)
            .map(|c| c.clone())
            .unwrap_or_else(|| Cart::empty(user_id, 0))
    }

    /// Insert or replace the quantity for `product_id` in the user's cart.
    pub fn upsert_line(&self, user_id: &str, product_id: &str, quantity: i64, now: i64) -> Cart {
        let mut entry = self
            .carts
            .entry(user_id.to_string())
            .or_insert_with(|| Cart::empty(user_id, now));
        entry.upsert_line(product_id, quantity, now);
        entry.clone()
    }

    /// Empty the user's cart. A missing cart is already empty; both cases
    /// end in the same state, which keeps the operation safe to replay.
    pub fn clear(&self, user_id: &str, now: i64) -> Cart {
        let mut entry = self
            .carts
            .entry(user_id.to_string())
            .or_insert_with(|| Cart::empty(user_id, now));
        entry.clear(now);
        entry.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_cart_is_empty() {
        let store = CartStore::new();
        let cart = store.get("u1");
        assert!(cart.is_empty());
        assert_eq!(cart.user_id, "u1");
    }

    #[test]
    fn test_upsert_then_clear() {
        let store = CartStore::new();
        store.upsert_line("u1", "p1", 2, 1);
        let cart = store.upsert_line("u1", "p1", 4, 2);
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].quantity, 4);

        let cleared = store.clear("u1", 3);
        assert!(cleared.is_empty());
        assert!(store.get("u1").is_empty());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let store = CartStore::new();
        store.upsert_line("u1", "p1", 2, 1);
        let first = store.clear("u1", 2);
        let second = store.clear("u1", 3);
        assert!(first.is_empty());
        assert!(second.is_empty());
    }

    #[test]
    fn test_carts_are_per_user() {
        let store = CartStore::new();
        store.upsert_line("u1", "p1", 2, 1);
        store.upsert_line("u2", "p2", 1, 1);
        assert_eq!(store.get("u1").lines[0].product_id, "p1");
        assert_eq!(store.get("u2").lines[0].product_id, "p2");
    }
}
