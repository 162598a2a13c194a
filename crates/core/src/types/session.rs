//! Per-user session state: cart, favorites, and cooldown timestamps.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ProductId;

/// One cart entry. Quantity is always at least 1; a line whose quantity would
/// drop to zero is removed from the cart instead of being retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Mutable per-user state, created lazily on first reference and kept for the
/// process lifetime.
///
/// `favorites` is a membership set kept in insertion order so the catalog
/// ranker has a deterministic order to present it in. `last_actions` maps
/// cooldown keys (see [`crate::ActionKind::key`]) to the timestamp of the last
/// *successful* invocation - failed attempts never land here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    pub cart: Vec<CartLine>,
    pub favorites: Vec<ProductId>,
    pub last_actions: HashMap<String, DateTime<Utc>>,
}

impl UserSession {
    /// An empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` units of a product to the cart, merging into an
    /// existing line if there is one.
    pub fn add_to_cart(&mut self, product_id: ProductId, quantity: u32) {
        if quantity == 0 {
            return;
        }
        if let Some(line) = self.cart.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.cart.push(CartLine {
                product_id,
                quantity,
            });
        }
    }

    /// Set a cart line's quantity outright. Zero removes the line.
    pub fn set_cart_quantity(&mut self, product_id: ProductId, quantity: u32) {
        if quantity == 0 {
            self.cart.retain(|l| l.product_id != product_id);
        } else if let Some(line) = self.cart.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = quantity;
        } else {
            self.cart.push(CartLine {
                product_id,
                quantity,
            });
        }
    }

    /// Current cart quantity for a product (0 when absent).
    #[must_use]
    pub fn cart_quantity(&self, product_id: ProductId) -> u32 {
        self.cart
            .iter()
            .find(|l| l.product_id == product_id)
            .map_or(0, |l| l.quantity)
    }

    /// Whether the product is currently a favorite.
    #[must_use]
    pub fn is_favorite(&self, product_id: ProductId) -> bool {
        self.favorites.contains(&product_id)
    }

    /// Flip the product's favorite membership. Returns `true` when the
    /// product is a favorite after the call.
    pub fn toggle_favorite(&mut self, product_id: ProductId) -> bool {
        if let Some(pos) = self.favorites.iter().position(|&id| id == product_id) {
            self.favorites.remove(pos);
            false
        } else {
            self.favorites.push(product_id);
            true
        }
    }
}
