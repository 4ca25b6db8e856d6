//! Cart operations.
//!
//! Cart mutations deliberately skip stock and balance checks: those are
//! checkout's job, where they run atomically. The dispatcher pre-checks
//! affordability before calling [`CartService::add_to_cart`] so users get
//! early feedback, but nothing here depends on it.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, instrument};

use chatshop_core::{ProductId, UserId};

use crate::error::{Result, ShopError};
use crate::locks::OpLocks;
use crate::models::{CartItem, Product, User};
use crate::store::{ProductStore, UserStore};

/// Mutates and prices user carts.
pub struct CartService {
    users: Arc<UserStore>,
    products: Arc<ProductStore>,
    locks: Arc<OpLocks>,
}

impl CartService {
    pub(crate) const fn new(
        users: Arc<UserStore>,
        products: Arc<ProductStore>,
        locks: Arc<OpLocks>,
    ) -> Self {
        Self {
            users,
            products,
            locks,
        }
    }

    /// Add `quantity` units of a product to the user's cart.
    ///
    /// Merges into an existing cart line for the same product, or appends
    /// a new one. Returns the updated user.
    ///
    /// # Errors
    ///
    /// - [`ShopError::InvalidQuantity`] if `quantity` is zero
    /// - [`ShopError::ProductNotFound`] if no product has this id
    /// - [`ShopError::UserNotFound`] if the user id is stale
    #[instrument(skip(self))]
    pub async fn add_to_cart(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<User> {
        if quantity == 0 {
            return Err(ShopError::InvalidQuantity {
                requested: quantity,
            });
        }

        let product = self
            .products
            .find(product_id)
            .await
            .ok_or(ShopError::ProductNotFound { id: product_id })?;

        let lock = self.locks.user(user_id).await;
        let _user_guard = lock.lock().await;

        let mut user = self
            .users
            .find(user_id)
            .await
            .ok_or(ShopError::UserNotFound { id: user_id })?;
        user.add_to_cart(product.id, quantity);
        self.users.save(user.clone()).await;

        info!(user_id = %user_id, product = %product.name, quantity, "added to cart");
        Ok(user)
    }

    /// Remove every line from the user's cart. Returns the updated user.
    ///
    /// # Errors
    ///
    /// Returns [`ShopError::UserNotFound`] if the user id is stale.
    #[instrument(skip(self))]
    pub async fn clear_cart(&self, user_id: UserId) -> Result<User> {
        let lock = self.locks.user(user_id).await;
        let _user_guard = lock.lock().await;

        let mut user = self
            .users
            .find(user_id)
            .await
            .ok_or(ShopError::UserNotFound { id: user_id })?;
        user.clear_cart();
        self.users.save(user.clone()).await;

        info!(user_id = %user_id, "cleared cart");
        Ok(user)
    }

    /// Resolve each cart line against the live catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ShopError::ProductNotFound`] if a line references a
    /// product that is no longer in the catalog.
    pub async fn cart_lines(&self, user: &User) -> Result<Vec<(CartItem, Product)>> {
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
        Ok(lines)
    }

    /// Total cost of the cart at live catalog prices.
    ///
    /// # Errors
    ///
    /// Returns [`ShopError::ProductNotFound`] if a line references a
    /// product that is no longer in the catalog.
    pub async fn cart_total(&self, user: &User) -> Result<Decimal> {
        let lines = self.cart_lines(user).await?;
        Ok(lines
            .iter()
            .map(|(item, product)| product.price * Decimal::from(item.quantity))
            .sum())
    }
}
