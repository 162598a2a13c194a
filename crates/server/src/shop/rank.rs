//! Personalized catalog ranking.
//!
//! The listing a user sees is their favorites first, then products already in
//! their cart, then the rest of the catalog by global popularity. Input order
//! never leaks through: the output is fully determined by session contents
//! and the products' `sold_count`/id.

use std::collections::HashMap;

use pantry_core::{Product, ProductId, UserSession};

/// Order the catalog for one user. Non-mutating; every input product appears
/// exactly once in the output.
///
/// Precedence:
/// 1. Favorites, in the order they were favorited.
/// 2. Cart products not already placed, in cart-line order.
/// 3. Everything else by `sold_count` descending, ties broken by ascending id.
///
/// The top of band 3 doubles as the "most popular" shelf; it needs no
/// separate sort because the whole band shares one comparator.
#[must_use]
pub fn rank(products: Vec<Product>, session: &UserSession) -> Vec<Product> {
    let mut head_ids: Vec<ProductId> = Vec::new();
    for &id in &session.favorites {
        if !head_ids.contains(&id) {
            head_ids.push(id);
        }
    }
    for line in &session.cart {
        if !head_ids.contains(&line.product_id) {
            head_ids.push(line.product_id);
        }
    }

    let mut by_id: HashMap<ProductId, Product> =
        products.into_iter().map(|p| (p.id, p)).collect();

    let mut ranked = Vec::with_capacity(by_id.len());
    for id in head_ids {
        // Session ids with no catalog entry are skipped, not invented
        if let Some(product) = by_id.remove(&id) {
            ranked.push(product);
        }
    }

    let mut rest: Vec<Product> = by_id.into_values().collect();
    rest.sort_by(|a, b| b.sold_count.cmp(&a.sold_count).then(a.id.cmp(&b.id)));
    ranked.extend(rest);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn product(id: i32, sold: u64) -> Product {
        let mut p = Product::new(
            ProductId::new(id),
            format!("Product {id}"),
            Decimal::new(100, 2),
            10,
        );
        p.sold_count = sold;
        p
    }

    fn ids(ranked: &[Product]) -> Vec<i32> {
        ranked.iter().map(|p| p.id.as_i32()).collect()
    }

    #[test]
    fn test_favorite_head_then_popularity() {
        // A:sold=5, B:sold=50, C:sold=20, favorites={C} => [C, B, A]
        let catalog = vec![product(1, 5), product(2, 50), product(3, 20)];
        let mut session = UserSession::new();
        session.toggle_favorite(ProductId::new(3));

        assert_eq!(ids(&rank(catalog, &session)), vec![3, 2, 1]);
    }

    #[test]
    fn test_cart_products_follow_favorites() {
        let catalog = vec![product(1, 5), product(2, 50), product(3, 20), product(4, 7)];
        let mut session = UserSession::new();
        session.add_to_cart(ProductId::new(4), 2);
        session.toggle_favorite(ProductId::new(1));

        assert_eq!(ids(&rank(catalog, &session)), vec![1, 4, 2, 3]);
    }

    #[test]
    fn test_every_product_exactly_once() {
        let catalog: Vec<Product> = (1..=25).map(|id| product(id, u64::from(id as u32))).collect();
        let mut session = UserSession::new();
        // A favorite that is also in the cart must not appear twice
        session.toggle_favorite(ProductId::new(7));
        session.add_to_cart(ProductId::new(7), 1);
        session.add_to_cart(ProductId::new(3), 1);

        let ranked = rank(catalog, &session);
        let mut seen = ids(&ranked);
        assert_eq!(seen.len(), 25);
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 25);
        assert_eq!(ranked.first().map(|p| p.id.as_i32()), Some(7));
    }

    #[test]
    fn test_deterministic_for_identical_inputs() {
        let catalog: Vec<Product> = (1..=12).map(|id| product(id, 100 - u64::from(id as u32))).collect();
        let mut session = UserSession::new();
        session.toggle_favorite(ProductId::new(9));
        session.add_to_cart(ProductId::new(2), 1);

        let first = rank(catalog.clone(), &session);
        let second = rank(catalog, &session);
        assert_eq!(first, second);
    }

    #[test]
    fn test_ties_break_by_ascending_id() {
        let catalog = vec![product(5, 30), product(2, 30), product(9, 30)];
        let session = UserSession::new();
        assert_eq!(ids(&rank(catalog, &session)), vec![2, 5, 9]);
    }

    #[test]
    fn test_empty_catalog() {
        let mut session = UserSession::new();
        session.toggle_favorite(ProductId::new(1));
        assert!(rank(Vec::new(), &session).is_empty());
    }

    #[test]
    fn test_input_order_does_not_leak() {
        let forward = vec![product(1, 5), product(2, 50), product(3, 20)];
        let mut reversed = forward.clone();
        reversed.reverse();
        let session = UserSession::new();
        assert_eq!(rank(forward, &session), rank(reversed, &session));
    }
}
