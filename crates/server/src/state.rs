//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::shop::ShopService;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the shop
/// engine and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    shop: ShopService,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: ServerConfig, shop: ShopService) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, shop }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the shop engine.
    #[must_use]
    pub fn shop(&self) -> &ShopService {
        &self.inner.shop
    }
}
