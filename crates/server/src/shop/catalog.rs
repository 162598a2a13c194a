//! In-memory catalog store.
//!
//! The store exclusively owns product mutation. Each product lives behind its
//! own row lock, so mutations of one product serialize without blocking reads
//! or writes of any other, and no reader ever observes a product mid-mutation.
//! The row set itself is fixed after load (products are never deleted at
//! runtime), so the outer map only ever takes short read locks.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};

use pantry_core::{Product, ProductId, ShopError};

/// Shared handle to the catalog. Cloning is cheap and refers to the same
/// underlying rows.
#[derive(Clone)]
pub struct CatalogStore {
    rows: Arc<RwLock<BTreeMap<ProductId, Arc<Mutex<Product>>>>>,
}

impl CatalogStore {
    /// Build a store from seed products. Later entries win on duplicate ids.
    #[must_use]
    pub fn from_products(products: Vec<Product>) -> Self {
        let rows = products
            .into_iter()
            .map(|p| (p.id, Arc::new(Mutex::new(p))))
            .collect();
        Self {
            rows: Arc::new(RwLock::new(rows)),
        }
    }

    /// Read-only snapshot of every product, ordered by id.
    ///
    /// Each row is copied under its own lock, so no product is observed
    /// mid-mutation; the catalog as a whole is not frozen while copying.
    pub async fn all(&self) -> Vec<Product> {
        let rows = self.rows.read().await;
        let handles: Vec<Arc<Mutex<Product>>> = rows.values().cloned().collect();
        drop(rows);

        let mut products = Vec::with_capacity(handles.len());
        for handle in handles {
            products.push(handle.lock().await.clone());
        }
        products
    }

    /// Copy of a single product.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::NotFound` for an unknown id.
    pub async fn get(&self, id: ProductId) -> Result<Product, ShopError> {
        let row = self.row(id).await?;
        let product = row.lock().await.clone();
        Ok(product)
    }

    /// The row lock for a product, for callers that need to validate and
    /// commit under one exclusive hold.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::NotFound` for an unknown id.
    pub async fn row(&self, id: ProductId) -> Result<Arc<Mutex<Product>>, ShopError> {
        self.rows
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(ShopError::NotFound(id))
    }

    /// Apply a signed stock adjustment to one product.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::NotFound` for an unknown id, or
    /// `ShopError::InsufficientStock` when the resulting stock would be
    /// negative (the product is left untouched).
    pub async fn apply_stock_delta(
        &self,
        id: ProductId,
        delta: i64,
    ) -> Result<Product, ShopError> {
        let row = self.row(id).await?;
        let mut product = row.lock().await;
        product.apply_stock_delta(delta)?;
        Ok(product.clone())
    }

    /// Commit a sale: stock down, `sold_count` up, together under the row lock.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::NotFound` for an unknown id, or
    /// `ShopError::InsufficientStock` when `quantity` exceeds current stock.
    pub async fn record_sale(&self, id: ProductId, quantity: u32) -> Result<Product, ShopError> {
        let row = self.row(id).await?;
        let mut product = row.lock().await;
        product.record_sale(quantity)?;
        Ok(product.clone())
    }

    /// Apply a stock re-count: perturbation plus `last_checked`, leaving
    /// `sold_count` alone.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::NotFound` for an unknown id.
    pub async fn touch_checked(
        &self,
        id: ProductId,
        now: DateTime<Utc>,
        simulated_delta: u32,
    ) -> Result<Product, ShopError> {
        let row = self.row(id).await?;
        let mut product = row.lock().await;
        product.touch_checked(now, simulated_delta);
        Ok(product.clone())
    }
}
