//! Coupon Model

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How a coupon's `value` is applied to the order subtotal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountKind {
    /// `value` percent off the subtotal (0-100)
    Percentage,
    /// `value` currency units off the subtotal, floored at zero
    FixedAmount,
}

/// Coupon entity
///
/// Orders snapshot `code`/`kind`/`value` at creation time; editing a coupon
/// afterwards never changes historical order pricing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Coupon {
    pub id: String,
    /// Unique redemption code
    pub code: String,
    pub kind: DiscountKind,
    pub value: f64,
    /// Validity window start (epoch millis, inclusive)
    pub valid_from: i64,
    /// Validity window end (epoch millis, inclusive)
    pub valid_to: i64,
    /// Restrict redemption to a single user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
}

/// Coupon creation/redemption errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CouponError {
    #[error("percentage discount must be between 0 and 100")]
    PercentageOutOfRange,

    #[error("discount value must be non-negative and finite")]
    InvalidValue,

    #[error("coupon validity window is inverted")]
    InvertedWindow,

    #[error("coupon is not valid at this time")]
    Expired,

    #[error("coupon is assigned to another user")]
    NotAssigned,
}

impl Coupon {
    /// Validate creation-time constraints.
    ///
    /// A percentage above 100 is an input error, not clamped.
    pub fn validate(&self) -> Result<(), CouponError> {
        if !self.value.is_finite() || self.value < 0.0 {
            return Err(CouponError::InvalidValue);
        }
        if self.kind == DiscountKind::Percentage && self.value > 100.0 {
            return Err(CouponError::PercentageOutOfRange);
        }
        if self.valid_from > self.valid_to {
            return Err(CouponError::InvertedWindow);
        }
        Ok(())
    }

    /// Check redemption eligibility for `user_id` at time `now` (millis).
    pub fn check_redeemable(&self, user_id: &str, now: i64) -> Result<(), CouponError> {
        if now < self.valid_from || now > self.valid_to {
            return Err(CouponError::Expired);
        }
        if let Some(assignee) = &self.assigned_to
            && assignee != user_id
        {
            return Err(CouponError::NotAssigned);
        }
        Ok(())
    }
}
