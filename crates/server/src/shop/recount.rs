//! Stock re-count policies for the Check action.
//!
//! A Check simulates a live inventory re-count by nudging the stock figure.
//! The policy is pluggable so tests can pin the perturbation.

use pantry_core::Product;

/// Produces the non-negative stock perturbation a Check applies.
pub trait StockRecount: Send + Sync {
    /// The number of units a re-count "found" for this product.
    fn simulated_delta(&self, product: &Product) -> u32;
}

/// Reference policy: a uniform random delta in `[0, max_delta]`.
#[derive(Debug, Clone, Copy)]
pub struct BoundedRecount {
    max_delta: u32,
}

impl BoundedRecount {
    /// A policy bounded at `max_delta` found units per re-count.
    #[must_use]
    pub const fn new(max_delta: u32) -> Self {
        Self { max_delta }
    }
}

impl Default for BoundedRecount {
    /// The reference bound of `[0, 2]`.
    fn default() -> Self {
        Self::new(2)
    }
}

impl StockRecount for BoundedRecount {
    fn simulated_delta(&self, _product: &Product) -> u32 {
        rand::random_range(0..=self.max_delta)
    }
}

/// Deterministic policy for tests: always the same delta.
#[derive(Debug, Clone, Copy)]
pub struct FixedRecount(pub u32);

impl StockRecount for FixedRecount {
    fn simulated_delta(&self, _product: &Product) -> u32 {
        self.0
    }
}
