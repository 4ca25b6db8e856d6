//! Checkout: converting a cart into a finalized order.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, instrument};

use chatshop_core::{OrderId, UserId};

use crate::error::{Result, ShopError};
use crate::locks::OpLocks;
use crate::models::{Order, OrderItem};
use crate::store::{OrderStore, ProductStore, UserStore};

/// Validates and atomically commits carts into orders.
pub struct CheckoutService {
    users: Arc<UserStore>,
    products: Arc<ProductStore>,
    orders: Arc<OrderStore>,
    locks: Arc<OpLocks>,
}

impl CheckoutService {
    pub(crate) const fn new(
        users: Arc<UserStore>,
        products: Arc<ProductStore>,
        orders: Arc<OrderStore>,
        locks: Arc<OpLocks>,
    ) -> Self {
        Self {
            users,
            products,
            orders,
            locks,
        }
    }

    /// Convert the user's cart into a finalized order.
    ///
    /// The sequence is: empty-cart check, total from live prices, balance
    /// check, stock check for every line, then commit. Balance is checked
    /// before stock - a broke user sees the balance error even when stock
    /// is also short; that ordering is part of the contract. No store is
    /// written until every check has passed, and the whole sequence runs
    /// under the user's lock plus the catalog lock, so a failure leaves
    /// cart, balance, and all stock exactly as they were, and no other
    /// checkout or stock adjustment interleaves with the commit.
    ///
    /// # Errors
    ///
    /// - [`ShopError::EmptyCart`] if the cart has no lines
    /// - [`ShopError::ProductNotFound`] if a line references a product
    ///   missing from the catalog
    /// - [`ShopError::InsufficientBalance`] with the required and
    ///   available amounts
    /// - [`ShopError::InsufficientStock`] with the product name and the
    ///   available and requested quantities
    /// - [`ShopError::UserNotFound`] if the user id is stale
    #[instrument(skip(self))]
    pub async fn create_order(&self, user_id: UserId) -> Result<Order> {
        let lock = self.locks.user(user_id).await;
        let _user_guard = lock.lock().await;
        let _catalog_guard = self.locks.catalog().lock().await;

        let mut user = self
            .users
            .find(user_id)
            .await
            .ok_or(ShopError::UserNotFound { id: user_id })?;

        if user.cart.is_empty() {
            return Err(ShopError::EmptyCart);
        }

        // Resolve every line against the live catalog before judging
        // anything, so all checks see one consistent view.
        let mut lines = Vec::with_capacity(user.cart.len());
        for item in &user.cart {
            let product = self
                .products
                .find(item.product_id)
                .await
                .ok_or(ShopError::ProductNotFound {
                    id: item.product_id,
                })?;
            lines.push((item.clone(), product));
        }

        let total: Decimal = lines
            .iter()
            .map(|(item, product)| product.price * Decimal::from(item.quantity))
            .sum();

        if user.balance < total {
            return Err(ShopError::InsufficientBalance {
                required: total,
                available: user.balance,
            });
        }

        for (item, product) in &lines {
            if !product.in_stock(item.quantity) {
                return Err(ShopError::InsufficientStock {
                    product: product.name.clone(),
                    available: product.stock,
                    requested: item.quantity,
                });
            }
        }

        // Every check passed; nothing below can fail.
        let items: Vec<OrderItem> = lines
            .iter()
            .map(|(item, product)| OrderItem::snapshot(product, item.quantity))
            .collect();
        let order = Order::new(self.orders.next_id(), user.id, items, total);

        for (item, mut product) in lines {
            product.stock -= item.quantity;
            self.products.save(product).await;
        }

        user.debit(total);
        user.clear_cart();
        self.users.save(user).await;
        self.orders.save(order.clone()).await;

        info!(order_id = %order.id, user_id = %user_id, total = %total, "order created");
        Ok(order)
    }

    /// All orders placed by a user, in creation order.
    pub async fn user_orders(&self, user_id: UserId) -> Vec<Order> {
        self.orders.find_by_user(user_id).await
    }

    /// Get an order by id.
    pub async fn order(&self, id: OrderId) -> Option<Order> {
        self.orders.find(id).await
    }
}
