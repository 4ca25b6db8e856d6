//! Product store.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use tokio::sync::RwLock;

use chatshop_core::ProductId;

use crate::models::Product;

/// Store for catalog products.
///
/// Backed by a `BTreeMap` so listings come out in ascending id order.
pub struct ProductStore {
    inner: RwLock<BTreeMap<ProductId, Product>>,
    next_id: AtomicI64,
}

impl ProductStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Get a product by id.
    pub async fn find(&self, id: ProductId) -> Option<Product> {
        self.inner.read().await.get(&id).cloned()
    }

    /// Get all products, in ascending id order.
    pub async fn find_all(&self) -> Vec<Product> {
        self.inner.read().await.values().cloned().collect()
    }

    /// Insert or replace a product.
    pub async fn save(&self, product: Product) {
        self.next_id
            .fetch_max(product.id.as_i64() + 1, Ordering::Relaxed);
        self.inner.write().await.insert(product.id, product);
    }

    /// Generate the next product id.
    #[must_use]
    pub fn next_id(&self) -> ProductId {
        ProductId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn product(id: i64, name: &str) -> Product {
        Product::new(ProductId::new(id), name.to_owned(), Decimal::from(10), 5)
    }

    #[tokio::test]
    async fn test_find_all_is_id_ordered() {
        let store = ProductStore::new();
        store.save(product(3, "c")).await;
        store.save(product(1, "a")).await;
        store.save(product(2, "b")).await;

        let names: Vec<String> = store.find_all().await.into_iter().map(|p| p.name).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_next_id_skips_seeded_ids() {
        let store = ProductStore::new();
        store.save(product(5, "seeded")).await;
        assert_eq!(store.next_id(), ProductId::new(6));
    }

    #[tokio::test]
    async fn test_save_is_upsert() {
        let store = ProductStore::new();
        store.save(product(1, "before")).await;
        store.save(product(1, "after")).await;
        assert_eq!(store.find(ProductId::new(1)).await.map(|p| p.name), Some("after".to_owned()));
        assert_eq!(store.find_all().await.len(), 1);
    }
}
