//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity (read-only within the checkout subsystem)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Unit price before discount (non-negative)
    pub price: f64,
    /// Product-level discount in percent (0-100)
    #[serde(default)]
    pub discount_percent: f64,
    /// Units available
    pub stock: i64,
    pub is_active: bool,
}

impl Product {
    /// Whether `quantity` units can currently be supplied.
    ///
    /// Advisory at cart/checkout time: stock may still change before the
    /// payment completes.
    pub fn in_stock(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }
}
