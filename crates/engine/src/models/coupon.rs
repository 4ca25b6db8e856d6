//! Coupon domain type.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use chatshop_core::CouponCode;

/// A one-time-per-user balance credit.
///
/// Immutable once created. Redemption is tracked on the [`super::User`]
/// that redeemed it, never by mutating the coupon itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
    /// Normalized, unique code.
    pub code: CouponCode,
    /// The amount credited to a balance on redemption. Non-negative.
    pub amount: Decimal,
}

impl Coupon {
    /// Create a new coupon.
    #[must_use]
    pub const fn new(code: CouponCode, amount: Decimal) -> Self {
        Self { code, amount }
    }
}
