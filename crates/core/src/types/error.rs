//! Domain error taxonomy for shop operations.
//!
//! Every operation on the shop engine returns a determinate success or one of
//! these typed failures. None of them is fatal to the process.

use chrono::TimeDelta;
use thiserror::Error;

use super::ProductId;

/// A typed, non-fatal failure of a shop operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShopError {
    /// Unknown product id.
    #[error("product {0} not found")]
    NotFound(ProductId),

    /// Requested quantity was zero or exceeded the available stock.
    ///
    /// Rejected before the cooldown gate is consulted, so a fumbled quantity
    /// never consumes the cooldown window.
    #[error("invalid quantity {quantity} for product {product_id} (stock: {stock})")]
    InvalidQuantity {
        product_id: ProductId,
        quantity: u32,
        stock: u32,
    },

    /// The action is still rate limited for this (user, product) pair.
    #[error("{action_key} is on cooldown for another {}ms", remaining.num_milliseconds())]
    CooldownActive {
        /// Cooldown key, e.g. `buy-3`.
        action_key: String,
        /// Time left until the action is permitted again.
        remaining: TimeDelta,
    },

    /// Stock would go negative on commit.
    ///
    /// Mutation of a product is serialized under its row lock, so this cannot
    /// occur after validation has passed; reaching it through the public
    /// operations indicates a consistency fault, not a client error.
    #[error("insufficient stock for product {0}")]
    InsufficientStock(ProductId),
}

impl ShopError {
    /// Whether the failure is the caller's fault (as opposed to a server-side
    /// consistency fault).
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        !matches!(self, Self::InsufficientStock(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = ShopError::NotFound(ProductId::new(999));
        assert_eq!(err.to_string(), "product 999 not found");

        let err = ShopError::CooldownActive {
            action_key: "buy-1".to_owned(),
            remaining: TimeDelta::milliseconds(4200),
        };
        assert_eq!(err.to_string(), "buy-1 is on cooldown for another 4200ms");
    }

    #[test]
    fn test_client_error_classification() {
        assert!(ShopError::NotFound(ProductId::new(1)).is_client_error());
        assert!(
            ShopError::InvalidQuantity {
                product_id: ProductId::new(1),
                quantity: 0,
                stock: 5,
            }
            .is_client_error()
        );
        assert!(!ShopError::InsufficientStock(ProductId::new(1)).is_client_error());
    }
}
