//! Pure pricing engine
//!
//! Computes frozen order lines and totals from product snapshots, quantities
//! and an optional coupon. No I/O and no side effects: the same inputs
//! always produce the same output.

use rust_decimal::Decimal;
use shared::models::{Coupon, DiscountKind, Product};
use shared::order::OrderLine;
use thiserror::Error;

use super::money::{MAX_PRICE, MAX_QUANTITY, require_finite, round2, to_decimal, to_f64};

/// Pricing input validation errors
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    #[error("invalid {field}: {detail}")]
    InvalidInput { field: &'static str, detail: String },

    #[error("quantity must be between 1 and {MAX_QUANTITY}, got {0}")]
    QuantityOutOfRange(i64),

    #[error("discount percent must be between 0 and 100, got {0}")]
    DiscountOutOfRange(f64),
}

/// One priced line: the frozen order line plus its line total
#[derive(Debug, Clone, PartialEq)]
pub struct PricedLine {
    pub line: OrderLine,
    pub line_total: f64,
}

/// Priced order totals
#[derive(Debug, Clone, PartialEq)]
pub struct PricedOrder {
    pub lines: Vec<OrderLine>,
    /// Sum of final_unit_price x quantity, pre-coupon
    pub order_price: f64,
    /// Order price after coupon, floored at zero
    pub final_price: f64,
}

/// Per-unit final price: `unit_price x (1 - discount_percent/100)`,
/// rounded half-up to 2 decimal places.
pub fn final_unit_price(unit_price: f64, discount_percent: f64) -> f64 {
    let base = to_decimal(unit_price);
    let discount = base * to_decimal(discount_percent) / Decimal::ONE_HUNDRED;
    to_f64((base - discount).max(Decimal::ZERO))
}

fn validate_line(product: &Product, quantity: i64) -> Result<(), PricingError> {
    require_finite(product.price, "price").map_err(|detail| PricingError::InvalidInput {
        field: "price",
        detail,
    })?;
    if product.price < 0.0 || product.price > MAX_PRICE {
        return Err(PricingError::InvalidInput {
            field: "price",
            detail: format!("must be between 0 and {}, got {}", MAX_PRICE, product.price),
        });
    }
    require_finite(product.discount_percent, "discount_percent").map_err(|detail| {
        PricingError::InvalidInput {
            field: "discount_percent",
            detail,
        }
    })?;
    if !(0.0..=100.0).contains(&product.discount_percent) {
        return Err(PricingError::DiscountOutOfRange(product.discount_percent));
    }
    if quantity <= 0 || quantity > MAX_QUANTITY {
        return Err(PricingError::QuantityOutOfRange(quantity));
    }
    Ok(())
}

/// Price one resolved cart line.
pub fn price_line(product: &Product, quantity: i64) -> Result<PricedLine, PricingError> {
    validate_line(product, quantity)?;

    let final_unit = final_unit_price(product.price, product.discount_percent);
    let line_total = to_f64(to_decimal(final_unit) * Decimal::from(quantity));

    Ok(PricedLine {
        line: OrderLine {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            discount_percent: product.discount_percent,
            final_unit_price: final_unit,
            quantity,
        },
        line_total,
    })
}

/// Apply a coupon to a subtotal. Assumes the coupon already passed
/// creation-time validation; the result is floored at zero either way.
fn apply_coupon(subtotal: Decimal, coupon: &Coupon) -> Decimal {
    let discounted = match coupon.kind {
        DiscountKind::FixedAmount => subtotal - to_decimal(coupon.value),
        DiscountKind::Percentage => {
            subtotal - round2(subtotal * to_decimal(coupon.value) / Decimal::ONE_HUNDRED)
        }
    };
    discounted.max(Decimal::ZERO)
}

/// Price a whole order: resolved `(product, quantity)` pairs plus an
/// optional coupon.
///
/// With no coupon the final price equals the subtotal and the order carries
/// no coupon snapshot (the caller decides that; this function only computes
/// totals).
pub fn price_order(
    items: &[(Product, i64)],
    coupon: Option<&Coupon>,
) -> Result<PricedOrder, PricingError> {
    let mut lines = Vec::with_capacity(items.len());
    let mut subtotal = Decimal::ZERO;

    for (product, quantity) in items {
        let priced = price_line(product, *quantity)?;
        subtotal += to_decimal(priced.line_total);
        lines.push(priced.line);
    }

    let final_price = match coupon {
        Some(c) => apply_coupon(subtotal, c),
        None => subtotal,
    };

    Ok(PricedOrder {
        lines,
        order_price: to_f64(subtotal),
        final_price: to_f64(final_price),
    })
}
