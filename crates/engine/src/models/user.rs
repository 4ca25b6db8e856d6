//! User domain types.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use chatshop_core::{ChatId, CouponCode, ProductId, UserId};

/// One line of a user's cart: a product reference and a quantity.
///
/// The product is referenced by id, not copied; prices are always read from
/// the live catalog until checkout snapshots them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// The selected product.
    pub product_id: ProductId,
    /// How many units the user wants. Always positive.
    pub quantity: u32,
}

/// A shopper account.
///
/// Created on first `/start` and kept for the process lifetime. The chat id
/// is the external messaging channel identity and never changes after
/// creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique account id.
    pub id: UserId,
    /// External messaging channel id, 1:1 with the account.
    pub chat_id: ChatId,
    /// Display name.
    pub name: String,
    /// Account balance. Never negative: only coupon credits add to it and
    /// only checkout debits subtract from it, after a sufficiency check.
    pub balance: Decimal,
    /// Pending product selection. At most one entry per product id.
    pub cart: Vec<CartItem>,
    /// Codes of coupons this user has already redeemed.
    pub coupons_used: HashSet<CouponCode>,
}

impl User {
    /// Create a new account with a zero balance and an empty cart.
    #[must_use]
    pub fn new(id: UserId, chat_id: ChatId, name: String) -> Self {
        Self {
            id,
            chat_id,
            name,
            balance: Decimal::ZERO,
            cart: Vec::new(),
            coupons_used: HashSet::new(),
        }
    }

    /// Add `quantity` units of a product to the cart.
    ///
    /// Merges into the existing line for that product if there is one;
    /// otherwise appends a new line. Quantity validation is the caller's
    /// job.
    pub fn add_to_cart(&mut self, product_id: ProductId, quantity: u32) {
        if let Some(line) = self.cart.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity += quantity;
            return;
        }

        self.cart.push(CartItem {
            product_id,
            quantity,
        });
    }

    /// Remove every line from the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    /// Add `amount` to the balance.
    pub fn credit(&mut self, amount: Decimal) {
        self.balance += amount;
    }

    /// Subtract `amount` from the balance.
    ///
    /// Callers must have checked `balance >= amount` first; the checkout
    /// service does so under its operation locks.
    pub fn debit(&mut self, amount: Decimal) {
        self.balance -= amount;
    }

    /// Whether this user has already redeemed the given coupon code.
    #[must_use]
    pub fn has_used(&self, code: &CouponCode) -> bool {
        self.coupons_used.contains(code)
    }

    /// Record a coupon code as redeemed by this user.
    pub fn record_coupon(&mut self, code: CouponCode) {
        self.coupons_used.insert(code);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn user() -> User {
        User::new(UserId::new(1), ChatId::new(100), "alice".to_owned())
    }

    #[test]
    fn test_new_user_starts_empty() {
        let u = user();
        assert_eq!(u.balance, Decimal::ZERO);
        assert!(u.cart.is_empty());
        assert!(u.coupons_used.is_empty());
    }

    #[test]
    fn test_add_to_cart_merges_same_product() {
        let mut u = user();
        u.add_to_cart(ProductId::new(2), 1);
        u.add_to_cart(ProductId::new(2), 3);
        assert_eq!(u.cart.len(), 1);
        assert_eq!(u.cart.first().unwrap().quantity, 4);
    }

    #[test]
    fn test_add_to_cart_keeps_distinct_products() {
        let mut u = user();
        u.add_to_cart(ProductId::new(2), 1);
        u.add_to_cart(ProductId::new(3), 1);
        assert_eq!(u.cart.len(), 2);
    }

    #[test]
    fn test_clear_cart() {
        let mut u = user();
        u.add_to_cart(ProductId::new(2), 1);
        u.clear_cart();
        assert!(u.cart.is_empty());
    }

    #[test]
    fn test_balance_arithmetic_is_exact() {
        let mut u = user();
        u.credit(Decimal::new(1005, 2)); // $10.05
        u.debit(Decimal::new(5, 2)); // $0.05
        assert_eq!(u.balance, Decimal::from(10));
    }

    #[test]
    fn test_coupon_recording() {
        let mut u = user();
        let code = CouponCode::parse("PROMO").unwrap();
        assert!(!u.has_used(&code));
        u.record_coupon(code.clone());
        assert!(u.has_used(&code));
        // Case-insensitive by construction of CouponCode
        assert!(u.has_used(&CouponCode::parse("promo").unwrap()));
    }
}
