//! Catalog operations: product lookup and restocking.

use std::sync::Arc;

use tracing::{info, instrument};

use chatshop_core::ProductId;

use crate::error::{Result, ShopError};
use crate::locks::OpLocks;
use crate::models::Product;
use crate::store::ProductStore;

/// Read and restock the product catalog.
pub struct CatalogService {
    products: Arc<ProductStore>,
    locks: Arc<OpLocks>,
}

impl CatalogService {
    pub(crate) const fn new(products: Arc<ProductStore>, locks: Arc<OpLocks>) -> Self {
        Self { products, locks }
    }

    /// List every product, in ascending id order.
    pub async fn list(&self) -> Vec<Product> {
        self.products.find_all().await
    }

    /// Get a product by id.
    ///
    /// # Errors
    ///
    /// Returns [`ShopError::ProductNotFound`] if no product has this id.
    pub async fn product(&self, id: ProductId) -> Result<Product> {
        self.products
            .find(id)
            .await
            .ok_or(ShopError::ProductNotFound { id })
    }

    /// Increase a product's available stock by `amount`.
    ///
    /// Stock only ever grows through this call; reductions happen solely
    /// inside a successful checkout. Runs under the catalog lock so it
    /// cannot interleave with a checkout's validate-and-commit sequence.
    ///
    /// # Errors
    ///
    /// Returns [`ShopError::ProductNotFound`] if no product has this id.
    #[instrument(skip(self))]
    pub async fn restock(&self, id: ProductId, amount: u32) -> Result<Product> {
        let _catalog_guard = self.locks.catalog().lock().await;

        let mut product = self
            .products
            .find(id)
            .await
            .ok_or(ShopError::ProductNotFound { id })?;
        product.restock(amount);
        self.products.save(product.clone()).await;

        info!(product_id = %id, stock = product.stock, "restocked product");
        Ok(product)
    }
}
