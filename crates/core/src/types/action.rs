//! Rate-limited action kinds and their cooldown keys.

use serde::{Deserialize, Serialize};

use super::ProductId;

/// The two rate-limited inventory actions.
///
/// Each carries its own cooldown, scoped per (user, product) through the key
/// produced by [`ActionKind::key`]. Cooldowns never share state across
/// products or users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Stock re-count request.
    Check,
    /// Purchase.
    Buy,
}

impl ActionKind {
    /// The action's wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Check => "check",
            Self::Buy => "buy",
        }
    }

    /// Cooldown key scoping this action to one product, e.g. `buy-3`.
    #[must_use]
    pub fn key(self, product_id: ProductId) -> String {
        format!("{}-{}", self.as_str(), product_id)
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_scoped_per_product() {
        assert_eq!(ActionKind::Check.key(ProductId::new(7)), "check-7");
        assert_eq!(ActionKind::Buy.key(ProductId::new(7)), "buy-7");
        assert_ne!(
            ActionKind::Buy.key(ProductId::new(7)),
            ActionKind::Buy.key(ProductId::new(8))
        );
    }
}
