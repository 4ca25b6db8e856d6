//! Coupon redemption.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, instrument};

use chatshop_core::{CouponCode, UserId};

use crate::error::{Result, ShopError};
use crate::locks::OpLocks;
use crate::store::{CouponStore, UserStore};

/// Applies one-time-per-user coupons to account balances.
pub struct CouponService {
    coupons: Arc<CouponStore>,
    users: Arc<UserStore>,
    locks: Arc<OpLocks>,
}

impl CouponService {
    pub(crate) const fn new(
        coupons: Arc<CouponStore>,
        users: Arc<UserStore>,
        locks: Arc<OpLocks>,
    ) -> Self {
        Self {
            coupons,
            users,
            locks,
        }
    }

    /// Redeem a coupon code for a user and credit its amount.
    ///
    /// The membership check on the user's redeemed set and the
    /// record-plus-credit both happen under the user's lock: there is no
    /// state where the code is recorded but the balance not credited, or
    /// the reverse, and two racing applications of the same code credit
    /// exactly once.
    ///
    /// Returns the credited amount.
    ///
    /// # Errors
    ///
    /// - [`ShopError::CouponNotFound`] if the code does not parse or no
    ///   coupon carries it
    /// - [`ShopError::CouponAlreadyUsed`] if this user already redeemed it
    /// - [`ShopError::UserNotFound`] if the user id is stale
    #[instrument(skip(self))]
    pub async fn apply(&self, user_id: UserId, code: &str) -> Result<Decimal> {
        let Ok(code) = CouponCode::parse(code) else {
            return Err(ShopError::CouponNotFound {
                code: code.trim().to_owned(),
            });
        };

        let coupon = self
            .coupons
            .find(&code)
            .await
            .ok_or_else(|| ShopError::CouponNotFound {
                code: code.to_string(),
            })?;

        let lock = self.locks.user(user_id).await;
        let _user_guard = lock.lock().await;

        let mut user = self
            .users
            .find(user_id)
            .await
            .ok_or(ShopError::UserNotFound { id: user_id })?;

        if user.has_used(&code) {
            return Err(ShopError::CouponAlreadyUsed {
                code: code.to_string(),
            });
        }

        user.record_coupon(code.clone());
        user.credit(coupon.amount);
        self.users.save(user).await;

        info!(user_id = %user_id, %code, amount = %coupon.amount, "applied coupon");
        Ok(coupon.amount)
    }
}
