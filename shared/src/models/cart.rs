//! Cart Model

use serde::{Deserialize, Serialize};

/// One product selection in a cart
///
/// Quantities are unique per product: upserting an existing product replaces
/// its quantity rather than appending a second line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLine {
    pub product_id: String,
    pub quantity: i64,
}

/// Per-user shopping cart
///
/// Pre-checkout working state, not an audit record: concurrent updates are
/// last-write-wins per product id. A cart is never deleted, only emptied.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    pub user_id: String,
    pub lines: Vec<CartLine>,
    /// Last mutation timestamp (epoch millis)
    pub updated_at: i64,
}

impl Cart {
    /// Create an empty cart for `user_id`.
    pub fn empty(user_id: impl Into<String>, now: i64) -> Self {
        Self {
            user_id: user_id.into(),
            lines: Vec::new(),
            updated_at: now,
        }
    }

    /// Insert or replace the line for `product_id`.
    pub fn upsert_line(&mut self, product_id: &str, quantity: i64, now: i64) {
        match self.lines.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => line.quantity = quantity,
            None => self.lines.push(CartLine {
                product_id: product_id.to_string(),
                quantity,
            }),
        }
        self.updated_at = now;
    }

    /// Empty the cart (checkout completion).
    pub fn clear(&mut self, now: i64) {
        self.lines.clear();
        self.updated_at = now;
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_inserts_then_replaces() {
        let mut cart = Cart::empty("u1", 0);
        cart.upsert_line("p1", 2, 1);
        cart.upsert_line("p2", 1, 2);
        assert_eq!(cart.lines.len(), 2);

        // Same product id replaces quantity, no second line
        cart.upsert_line("p1", 5, 3);
        assert_eq!(cart.lines.len(), 2);
        assert_eq!(cart.lines[0].quantity, 5);
        assert_eq!(cart.updated_at, 3);
    }

    #[test]
    fn test_clear_keeps_cart() {
        let mut cart = Cart::empty("u1", 0);
        cart.upsert_line("p1", 2, 1);
        cart.clear(2);
        assert!(cart.is_empty());
        assert_eq!(cart.user_id, "u1");
    }
}
