//! Product catalog store
//!
//! Read model for checkout plus the authoritative stock decrement. The
//! decrement is conditional and runs inside the product's map entry, so two
//! concurrent commits against the same product serialize and stock never
//! goes negative; a losing commit observes `Conflict` instead.

use dashmap::DashMap;
use shared::models::Product;

/// Outcome of a conditional stock decrement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecrementOutcome {
    /// Stock reduced by the requested quantity
    Applied { remaining: i64 },
    /// Guard `stock >= qty` failed; stock left unchanged
    Conflict { stock: i64, requested: i64 },
    /// No such product
    NotFound,
}

/// Product catalog
#[derive(Debug, Default)]
pub struct ProductCatalog {
    products: DashMap<String, Product>,
}

impl ProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a product (catalog sync from the upstream owner).
    pub fn upsert(&self, product: Product) {
        self.products.insert(product.id.clone(), product);
    }

    pub fn get(&self, id: &str) -> Option<Product> {
        self.products.get(id).map(|p| p.clone())
    }

    /// Conditionally decrement stock: `stock -= qty` guarded by
    /// `stock >= qty`.
    ///
    /// This is the oversell strategy: the guard runs under the entry lock,
    /// so a concurrent competing decrement observes `Conflict` rather than
    /// driving stock negative.
    pub fn decrement_stock(&self, id: &str, qty: i64) -> DecrementOutcome {
        let Some(mut entry) = self.products.get_mut(id) else {
            return DecrementOutcome::NotFound;
        };
        if entry.stock < qty {
            return DecrementOutcome::Conflict {
                stock: entry.stock,
                requested: qty,
            };
        }
        entry.stock -= qty;
        DecrementOutcome::Applied {
            remaining: entry.stock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn product(id: &str, stock: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            price: 10.0,
            discount_percent: 0.0,
            stock,
            is_active: true,
        }
    }

    #[test]
    fn test_decrement_applies_and_conflicts() {
        let catalog = ProductCatalog::new();
        catalog.upsert(product("p1", 5));

        assert_eq!(
            catalog.decrement_stock("p1", 3),
            DecrementOutcome::Applied { remaining: 2 }
        );
        assert_eq!(
            catalog.decrement_stock("p1", 3),
            DecrementOutcome::Conflict {
                stock: 2,
                requested: 3
            }
        );
        // Stock unchanged by the conflicting attempt
        assert_eq!(catalog.get("p1").unwrap().stock, 2);
    }

    #[test]
    fn test_decrement_unknown_product() {
        let catalog = ProductCatalog::new();
        assert_eq!(catalog.decrement_stock("ghost", 1), DecrementOutcome::NotFound);
    }

    #[test]
    fn test_concurrent_decrements_never_oversell() {
        let catalog = Arc::new(ProductCatalog::new());
        catalog.upsert(product("p1", 10));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let catalog = Arc::clone(&catalog);
                std::thread::spawn(move || {
                    matches!(
                        catalog.decrement_stock("p1", 3),
                        DecrementOutcome::Applied { .. }
                    )
                })
            })
            .collect();

        let applied = handles
            .into_iter()
            .map(|h| h.join().unwrap_or(false))
            .filter(|&won| won)
            .count();

        // 10 units / 3 per commit: exactly 3 commits can win
        assert_eq!(applied, 3);
        assert_eq!(catalog.get("p1").unwrap().stock, 1);
    }
}
