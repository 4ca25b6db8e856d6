//! Coupon store.

use std::collections::HashMap;

use tokio::sync::RwLock;

use chatshop_core::CouponCode;

use crate::models::Coupon;

/// Store for coupons, keyed by normalized code.
///
/// [`CouponCode`] normalizes on construction, so lookups are
/// case-insensitive by the time they reach the map.
pub struct CouponStore {
    inner: RwLock<HashMap<CouponCode, Coupon>>,
}

impl CouponStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Get a coupon by its normalized code.
    pub async fn find(&self, code: &CouponCode) -> Option<Coupon> {
        self.inner.read().await.get(code).cloned()
    }

    /// Get all coupons.
    pub async fn find_all(&self) -> Vec<Coupon> {
        self.inner.read().await.values().cloned().collect()
    }

    /// Insert or replace a coupon.
    pub async fn save(&self, coupon: Coupon) {
        self.inner
            .write()
            .await
            .insert(coupon.code.clone(), coupon);
    }
}

impl Default for CouponStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[tokio::test]
    async fn test_lookup_is_case_insensitive() {
        let store = CouponStore::new();
        let code = CouponCode::parse("Welcome1000").unwrap();
        store.save(Coupon::new(code, Decimal::from(1000))).await;

        let found = store.find(&CouponCode::parse("WELCOME1000").unwrap()).await;
        assert_eq!(found.map(|c| c.amount), Some(Decimal::from(1000)));
    }

    #[tokio::test]
    async fn test_missing_code_is_none() {
        let store = CouponStore::new();
        assert!(store.find(&CouponCode::parse("NOPE").unwrap()).await.is_none());
    }
}
