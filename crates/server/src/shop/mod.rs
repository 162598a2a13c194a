//! The shop engine: catalog, sessions, and the operations that tie them
//! together.
//!
//! [`ShopService`] is the single entry point the HTTP layer talks to. Each
//! operation validates first and commits second, holding the exclusive locks
//! of everything it will touch for the whole validate-then-commit span, so a
//! request either happens entirely or leaves no trace.
//!
//! Lock order: cross-entity commits take the user's session lock first, then
//! the product row lock. Every path follows that order, so the pair can never
//! deadlock.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, instrument};

use pantry_core::{ActionKind, CartLine, Product, ProductId, ShopError, UserId, UserSession};

use crate::notify::Notifier;

pub mod catalog;
pub mod cooldown;
pub mod rank;
pub mod recount;
pub mod seed;
pub mod session;

pub use catalog::CatalogStore;
pub use cooldown::CooldownPolicy;
pub use recount::{BoundedRecount, FixedRecount, StockRecount};
pub use session::SessionStore;

/// A user's cart joined with current catalog data, ready for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total_price: Decimal,
}

/// One cart line with its product's name and current unit price.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    pub total: Decimal,
}

/// The shop engine.
pub struct ShopService {
    catalog: CatalogStore,
    sessions: SessionStore,
    policy: CooldownPolicy,
    recount: Arc<dyn StockRecount>,
    notifier: Notifier,
}

impl ShopService {
    /// Assemble the engine with the default cooldown policy and re-count
    /// behavior.
    #[must_use]
    pub fn new(catalog: CatalogStore, notifier: Notifier) -> Self {
        Self {
            catalog,
            sessions: SessionStore::new(),
            policy: CooldownPolicy::default(),
            recount: Arc::new(BoundedRecount::default()),
            notifier,
        }
    }

    /// Replace the cooldown policy.
    #[must_use]
    pub fn with_policy(mut self, policy: CooldownPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the stock re-count policy.
    #[must_use]
    pub fn with_recount(mut self, recount: Arc<dyn StockRecount>) -> Self {
        self.recount = recount;
        self
    }

    /// The catalog handle (shared with the snapshot task).
    #[must_use]
    pub const fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    /// The catalog ordered for this user, optionally filtered by a
    /// case-insensitive name substring first.
    #[instrument(skip(self))]
    pub async fn list_products(&self, user: &UserId, search: Option<&str>) -> Vec<Product> {
        let mut products = self.catalog.all().await;
        if let Some(needle) = search.map(str::trim).filter(|s| !s.is_empty()) {
            let needle = needle.to_lowercase();
            products.retain(|p| p.name.to_lowercase().contains(&needle));
        }
        let session = self.sessions.snapshot(user).await;
        rank::rank(products, &session)
    }

    /// Request a stock re-count for a product.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown product; `CooldownActive` while the per-user
    /// check window for this product is still closed. Neither mutates
    /// anything.
    #[instrument(skip(self))]
    pub async fn check_product(
        &self,
        user: &UserId,
        product_id: ProductId,
        now: DateTime<Utc>,
    ) -> Result<Product, ShopError> {
        let row = self.catalog.row(product_id).await?;
        let session_handle = self.sessions.get_or_create(user).await;
        let key = ActionKind::Check.key(product_id);

        let updated = {
            let mut session = session_handle.lock().await;
            let mut product = row.lock().await;

            if let Some(remaining) = cooldown::remaining(&session, &key, self.policy.check, now) {
                return Err(ShopError::CooldownActive {
                    action_key: key,
                    remaining,
                });
            }

            let delta = self.recount.simulated_delta(&product);
            product.touch_checked(now, delta);
            cooldown::record(&mut session, key, now);
            product.clone()
        };

        info!(stock = updated.stock, "stock re-count applied");
        self.notifier
            .send(format!("{user} requested a stock check for {}", updated.name));
        Ok(updated)
    }

    /// Buy `quantity` units of a product, adding them to the user's cart.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown product; `InvalidQuantity` when the quantity
    /// is zero or exceeds stock (checked before the cooldown so a fumbled
    /// request never consumes the window); `CooldownActive` while the per-user
    /// buy window for this product is still closed. No failure mutates
    /// anything.
    #[instrument(skip(self))]
    pub async fn buy_product(
        &self,
        user: &UserId,
        product_id: ProductId,
        quantity: u32,
        now: DateTime<Utc>,
    ) -> Result<(Product, Vec<CartLine>), ShopError> {
        let row = self.catalog.row(product_id).await?;
        let session_handle = self.sessions.get_or_create(user).await;
        let key = ActionKind::Buy.key(product_id);

        let (updated, cart) = {
            let mut session = session_handle.lock().await;
            let mut product = row.lock().await;

            if quantity == 0 || quantity > product.stock {
                return Err(ShopError::InvalidQuantity {
                    product_id,
                    quantity,
                    stock: product.stock,
                });
            }
            if let Some(remaining) = cooldown::remaining(&session, &key, self.policy.buy, now) {
                return Err(ShopError::CooldownActive {
                    action_key: key,
                    remaining,
                });
            }

            // Validation passed under the same locks, so this cannot fail
            product.record_sale(quantity)?;
            session.add_to_cart(product_id, quantity);
            cooldown::record(&mut session, key, now);
            (product.clone(), session.cart.clone())
        };

        let total = updated.price * Decimal::from(quantity);
        info!(stock = updated.stock, sold = updated.sold_count, "sale recorded");
        self.notifier.send(format!(
            "{user} bought {quantity} x {} for ${total}",
            updated.name
        ));
        Ok((updated, cart))
    }

    /// The user's cart joined with current product names and prices.
    #[instrument(skip(self))]
    pub async fn cart(&self, user: &UserId) -> CartView {
        let session = self.sessions.snapshot(user).await;
        self.cart_view(&session).await
    }

    /// Set a cart line's quantity outright; zero removes the line.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown product.
    #[instrument(skip(self))]
    pub async fn set_cart_line(
        &self,
        user: &UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<CartView, ShopError> {
        // Resolve first so a typo'd id cannot create a phantom cart line
        self.catalog.row(product_id).await?;
        let session_handle = self.sessions.get_or_create(user).await;

        let session = {
            let mut session = session_handle.lock().await;
            session.set_cart_quantity(product_id, quantity);
            session.clone()
        };
        Ok(self.cart_view(&session).await)
    }

    /// Flip a product in or out of the user's favorites. Returns the updated
    /// favorite set in insertion order.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown product.
    #[instrument(skip(self))]
    pub async fn toggle_favorite(
        &self,
        user: &UserId,
        product_id: ProductId,
    ) -> Result<Vec<ProductId>, ShopError> {
        let row = self.catalog.row(product_id).await?;
        let session_handle = self.sessions.get_or_create(user).await;

        let mut session = session_handle.lock().await;
        let mut product = row.lock().await;
        if session.toggle_favorite(product_id) {
            product.favorite_added();
        } else {
            product.favorite_removed();
        }
        Ok(session.favorites.clone())
    }

    /// Forward a user-reported issue to the notifier.
    #[instrument(skip(self, message))]
    pub async fn report_issue(&self, user: &UserId, message: &str) {
        info!("issue reported");
        self.notifier.send(format!("Issue from {user}: {message}"));
    }

    async fn cart_view(&self, session: &UserSession) -> CartView {
        let mut lines = Vec::with_capacity(session.cart.len());
        let mut total_price = Decimal::ZERO;
        for line in &session.cart {
            // Products are never deleted at runtime, so this lookup only
            // misses for ids that never existed
            let Ok(product) = self.catalog.get(line.product_id).await else {
                continue;
            };
            let total = product.price * Decimal::from(line.quantity);
            total_price += total;
            lines.push(CartLineView {
                product_id: line.product_id,
                name: product.name,
                price: product.price,
                quantity: line.quantity,
                total,
            });
        }
        CartView { lines, total_price }
    }
}
