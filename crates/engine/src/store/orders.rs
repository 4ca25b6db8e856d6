//! Order store.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use tokio::sync::RwLock;

use chatshop_core::{OrderId, UserId};

use crate::models::Order;

/// Append-only store for finalized orders.
///
/// Order ids are monotonic, so iterating the `BTreeMap` yields creation
/// order; `find_by_user` relies on that to return a user's history
/// oldest-first.
pub struct OrderStore {
    inner: RwLock<BTreeMap<OrderId, Order>>,
    next_id: AtomicI64,
}

impl OrderStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Get an order by id.
    pub async fn find(&self, id: OrderId) -> Option<Order> {
        self.inner.read().await.get(&id).cloned()
    }

    /// Get all orders placed by a user, in creation order.
    pub async fn find_by_user(&self, user_id: UserId) -> Vec<Order> {
        self.inner
            .read()
            .await
            .values()
            .filter(|order| order.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Append a finalized order.
    pub async fn save(&self, order: Order) {
        self.next_id
            .fetch_max(order.id.as_i64() + 1, Ordering::Relaxed);
        self.inner.write().await.insert(order.id, order);
    }

    /// Generate the next order id.
    #[must_use]
    pub fn next_id(&self) -> OrderId {
        OrderId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for OrderStore {
    fn default() -> Self {
        Self::new()
    }
}
