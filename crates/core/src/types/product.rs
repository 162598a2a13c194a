//! Catalog products and their invariant-preserving mutations.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ProductId;
use super::error::ShopError;

/// A purchasable catalog item.
///
/// Two invariants hold for the catalog's whole lifetime: `stock` never goes
/// negative, and `sold_count` only grows, and only through [`Product::record_sale`].
/// All stock mutation goes through the methods below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Unit price in the shop currency.
    pub price: Decimal,
    pub stock: u32,
    pub sold_count: u64,
    /// How many users currently have this product in their favorites.
    #[serde(default)]
    pub favorite_count: u32,
    /// When a stock re-count was last requested, if ever.
    pub last_checked: Option<DateTime<Utc>>,
}

impl Product {
    /// Create a product with fresh counters.
    #[must_use]
    pub fn new(id: ProductId, name: impl Into<String>, price: Decimal, stock: u32) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            price,
            stock,
            sold_count: 0,
            favorite_count: 0,
            last_checked: None,
        }
    }

    /// Apply a signed stock adjustment.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::InsufficientStock` when the resulting stock would
    /// be negative; the product is left untouched.
    pub fn apply_stock_delta(&mut self, delta: i64) -> Result<u32, ShopError> {
        let next = i64::from(self.stock) + delta;
        let next = u32::try_from(next).map_err(|_| ShopError::InsufficientStock(self.id))?;
        self.stock = next;
        Ok(next)
    }

    /// Commit a sale: decrement stock and increment `sold_count` together.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::InsufficientStock` when `quantity` exceeds the
    /// current stock. Neither counter moves in that case.
    pub fn record_sale(&mut self, quantity: u32) -> Result<(), ShopError> {
        if quantity > self.stock {
            return Err(ShopError::InsufficientStock(self.id));
        }
        self.stock -= quantity;
        self.sold_count += u64::from(quantity);
        Ok(())
    }

    /// Apply a stock re-count result: a non-negative perturbation plus a
    /// `last_checked` update. `sold_count` is unaffected.
    pub fn touch_checked(&mut self, now: DateTime<Utc>, simulated_delta: u32) {
        self.stock = self.stock.saturating_add(simulated_delta);
        self.last_checked = Some(now);
    }

    /// A user added this product to their favorites.
    pub const fn favorite_added(&mut self) {
        self.favorite_count = self.favorite_count.saturating_add(1);
    }

    /// A user removed this product from their favorites. The counter never
    /// goes below zero.
    pub const fn favorite_removed(&mut self) {
        self.favorite_count = self.favorite_count.saturating_sub(1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(stock: u32) -> Product {
        Product::new(ProductId::new(1), "Cocoa Powder", Decimal::new(499, 2), stock)
    }

    #[test]
    fn test_record_sale_moves_both_counters() {
        let mut p = product(10);
        p.record_sale(3).unwrap();
        assert_eq!(p.stock, 7);
        assert_eq!(p.sold_count, 3);
    }

    #[test]
    fn test_record_sale_rejects_overdraw() {
        let mut p = product(2);
        let err = p.record_sale(3).unwrap_err();
        assert_eq!(err, ShopError::InsufficientStock(p.id));
        // Neither counter moved
        assert_eq!(p.stock, 2);
        assert_eq!(p.sold_count, 0);
    }

    #[test]
    fn test_apply_stock_delta_floor() {
        let mut p = product(5);
        assert_eq!(p.apply_stock_delta(-5).unwrap(), 0);
        assert!(p.apply_stock_delta(-1).is_err());
        assert_eq!(p.stock, 0);
    }

    #[test]
    fn test_touch_checked_leaves_sold_count() {
        let mut p = product(5);
        let now = Utc::now();
        p.touch_checked(now, 2);
        assert_eq!(p.stock, 7);
        assert_eq!(p.sold_count, 0);
        assert_eq!(p.last_checked, Some(now));
    }

    #[test]
    fn test_favorite_counter_never_negative() {
        let mut p = product(5);
        p.favorite_removed();
        assert_eq!(p.favorite_count, 0);
        p.favorite_added();
        p.favorite_added();
        p.favorite_removed();
        assert_eq!(p.favorite_count, 1);
    }
}
