//! Stock availability pre-check and commit
//!
//! The pre-check runs at order-creation time: any line short on stock
//! aborts checkout naming the offending product, and nothing is mutated.
//! It is advisory, not a reservation; stock may still change before the
//! payment completes.
//!
//! The commit runs at reconciliation time, only on the event that wins the
//! `PENDING -> PLACED` transition, which is what makes it idempotent under
//! at-least-once delivery. Each line decrements through the catalog's
//! conditional update; a failed guard surfaces as a conflict for operator
//! remediation instead of driving stock negative.

use shared::models::Product;
use shared::order::OrderLine;
use thiserror::Error;

use crate::store::{DecrementOutcome, ProductCatalog};

/// Pre-check errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StockError {
    #[error("Out of stock: {name} ({product_id}) has {stock}, requested {requested}")]
    OutOfStock {
        product_id: String,
        name: String,
        stock: i64,
        requested: i64,
    },
}

/// One failed decrement during commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitConflict {
    pub product_id: String,
    pub detail: String,
}

/// Require `stock >= quantity` for every line. Returns on the first
/// violation; the caller must not have created or mutated anything yet.
pub fn precheck(items: &[(Product, i64)]) -> Result<(), StockError> {
    for (product, quantity) in items {
        if !product.in_stock(*quantity) {
            return Err(StockError::OutOfStock {
                product_id: product.id.clone(),
                name: product.name.clone(),
                stock: product.stock,
                requested: *quantity,
            });
        }
    }
    Ok(())
}

/// Decrement stock for every frozen order line. Returns the conflicts (empty
/// on full success); successful lines stay decremented even when a later
/// line conflicts, since the order is already PLACED and the discrepancy is
/// an operator-remediation case, not a rollback case.
pub fn commit_decrements(catalog: &ProductCatalog, lines: &[OrderLine]) -> Vec<CommitConflict> {
    let mut conflicts = Vec::new();

    for line in lines {
        match catalog.decrement_stock(&line.product_id, line.quantity) {
            DecrementOutcome::Applied { remaining } => {
                tracing::debug!(
                    product_id = %line.product_id,
                    quantity = line.quantity,
                    remaining,
                    "Stock decremented"
                );
            }
            DecrementOutcome::Conflict { stock, requested } => {
                conflicts.push(CommitConflict {
                    product_id: line.product_id.clone(),
                    detail: format!("stock {} below requested {}", stock, requested),
                });
            }
            DecrementOutcome::NotFound => {
                conflicts.push(CommitConflict {
                    product_id: line.product_id.clone(),
                    detail: "product missing from catalog".to_string(),
                });
            }
        }
    }

    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;

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

    fn line(product_id: &str, quantity: i64) -> OrderLine {
        OrderLine {
            product_id: product_id.to_string(),
            name: format!("Product {}", product_id),
            unit_price: 10.0,
            discount_percent: 0.0,
            final_unit_price: 10.0,
            quantity,
        }
    }

    #[test]
    fn test_precheck_passes_at_boundary() {
        assert!(precheck(&[(product("p1", 2), 2)]).is_ok());
    }

    #[test]
    fn test_precheck_names_offending_product() {
        // stock = 1, requested = 2 -> rejected, nothing mutated
        let err = precheck(&[(product("p1", 5), 1), (product("p2", 1), 2)]).unwrap_err();
        assert_eq!(
            err,
            StockError::OutOfStock {
                product_id: "p2".to_string(),
                name: "Product p2".to_string(),
                stock: 1,
                requested: 2,
            }
        );
    }

    #[test]
    fn test_commit_decrements_all_lines() {
        let catalog = ProductCatalog::new();
        catalog.upsert(product("p1", 5));
        catalog.upsert(product("p2", 3));

        let conflicts = commit_decrements(&catalog, &[line("p1", 2), line("p2", 3)]);
        assert!(conflicts.is_empty());
        assert_eq!(catalog.get("p1").unwrap().stock, 3);
        assert_eq!(catalog.get("p2").unwrap().stock, 0);
    }

    #[test]
    fn test_commit_reports_conflicts_without_rollback() {
        let catalog = ProductCatalog::new();
        catalog.upsert(product("p1", 5));
        catalog.upsert(product("p2", 1));

        let conflicts = commit_decrements(&catalog, &[line("p1", 2), line("p2", 3)]);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].product_id, "p2");
        // p1 stays decremented, p2 untouched
        assert_eq!(catalog.get("p1").unwrap().stock, 3);
        assert_eq!(catalog.get("p2").unwrap().stock, 1);
    }

    #[test]
    fn test_commit_missing_product() {
        let catalog = ProductCatalog::new();
        let conflicts = commit_decrements(&catalog, &[line("ghost", 1)]);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].product_id, "ghost");
    }
}
