//! Coupon catalog store
//!
//! Keyed by redemption code (unique). Orders never hold a live reference
//! into this store: checkout snapshots the coupon's terms into the order,
//! so later edits here cannot change historical pricing.

use dashmap::DashMap;
use shared::models::{Coupon, CouponError};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CouponStoreError {
    #[error("coupon code already exists: {0}")]
    DuplicateCode(String),

    #[error(transparent)]
    Invalid(#[from] CouponError),
}

#[derive(Debug, Default)]
pub struct CouponCatalog {
    by_code: DashMap<String, Coupon>,
}

impl CouponCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a coupon. Creation-time validation applies here: a percentage
    /// value above 100 is rejected, not clamped.
    pub fn insert(&self, coupon: Coupon) -> Result<(), CouponStoreError> {
        coupon.validate()?;
        match self.by_code.entry(coupon.code.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                Err(CouponStoreError::DuplicateCode(coupon.code))
            }
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(coupon);
                Ok(())
            }
        }
    }

    pub fn get_by_code(&self, code: &str) -> Option<Coupon> {
        self.by_code.get(code).map(|c| c.clone())
    }

    /// Replace a coupon's terms (upstream edit). Historical orders keep
    /// their snapshots.
    pub fn update(&self, coupon: Coupon) -> Result<(), CouponStoreError> {
        coupon.validate()?;
        self.by_code.insert(coupon.code.clone(), coupon);
        Ok(())
    }
}
