//! Integration tests for Pantry.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pantry-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `shop_flow` - Shop engine scenarios over the assembled service
//! - `api` - HTTP round trips through the axum router
//!
//! Everything runs in-process against seed data: no network, no clock. Tests
//! pass explicit timestamps into the engine and pin the re-count policy, so
//! they are deterministic.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use pantry_core::Product;
use pantry_server::notify::Notifier;
use pantry_server::shop::{CatalogStore, FixedRecount, ShopService, seed};

/// A shop engine over the default seed catalog with the re-count policy
/// pinned to a fixed delta.
#[must_use]
pub fn seeded_service(recount_delta: u32) -> ShopService {
    service_with(seed::default_catalog(), recount_delta)
}

/// A shop engine over an explicit catalog with a pinned re-count policy.
#[must_use]
pub fn service_with(products: Vec<Product>, recount_delta: u32) -> ShopService {
    ShopService::new(CatalogStore::from_products(products), Notifier::disabled())
        .with_recount(Arc::new(FixedRecount(recount_delta)))
}
