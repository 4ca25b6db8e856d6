//! Wiring of stores, locks, and services.

use std::sync::Arc;

use crate::locks::OpLocks;
use crate::service::{AccountService, CartService, CatalogService, CheckoutService, CouponService};
use crate::store::{CouponStore, OrderStore, ProductStore, UserStore};

/// The assembled commerce engine.
///
/// Owns the four entity stores, the operation locks, and one instance of
/// each service wired over them. Cheaply cloneable via `Arc`; clones share
/// all state.
#[derive(Clone)]
pub struct Shop {
    inner: Arc<ShopInner>,
}

struct ShopInner {
    products: Arc<ProductStore>,
    coupons: Arc<CouponStore>,
    account: AccountService,
    catalog: CatalogService,
    cart: CartService,
    coupon: CouponService,
    checkout: CheckoutService,
}

impl Shop {
    /// Create an empty shop: no users, no products, no coupons, no orders.
    #[must_use]
    pub fn new() -> Self {
        let users = Arc::new(UserStore::new());
        let products = Arc::new(ProductStore::new());
        let orders = Arc::new(OrderStore::new());
        let coupons = Arc::new(CouponStore::new());
        let locks = Arc::new(OpLocks::new());

        let account = AccountService::new(Arc::clone(&users));
        let catalog = CatalogService::new(Arc::clone(&products), Arc::clone(&locks));
        let cart = CartService::new(
            Arc::clone(&users),
            Arc::clone(&products),
            Arc::clone(&locks),
        );
        let coupon = CouponService::new(
            Arc::clone(&coupons),
            Arc::clone(&users),
            Arc::clone(&locks),
        );
        let checkout = CheckoutService::new(users, Arc::clone(&products), orders, locks);

        Self {
            inner: Arc::new(ShopInner {
                products,
                coupons,
                account,
                catalog,
                cart,
                coupon,
                checkout,
            }),
        }
    }

    /// Account resolution and creation.
    #[must_use]
    pub fn account(&self) -> &AccountService {
        &self.inner.account
    }

    /// Catalog reads and restocking.
    #[must_use]
    pub fn catalog(&self) -> &CatalogService {
        &self.inner.catalog
    }

    /// Cart mutation and pricing.
    #[must_use]
    pub fn cart(&self) -> &CartService {
        &self.inner.cart
    }

    /// Coupon redemption.
    #[must_use]
    pub fn coupon(&self) -> &CouponService {
        &self.inner.coupon
    }

    /// Checkout and order history.
    #[must_use]
    pub fn checkout(&self) -> &CheckoutService {
        &self.inner.checkout
    }

    /// The product store, for seed loading.
    #[must_use]
    pub fn products(&self) -> &ProductStore {
        &self.inner.products
    }

    /// The coupon store, for seed loading.
    #[must_use]
    pub fn coupons(&self) -> &CouponStore {
        &self.inner.coupons
    }
}

impl Default for Shop {
    fn default() -> Self {
        Self::new()
    }
}
