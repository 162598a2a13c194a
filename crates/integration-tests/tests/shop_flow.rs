//! End-to-end shop engine scenarios.
//!
//! These drive the assembled service the way the HTTP layer does, with
//! explicit timestamps and a pinned re-count policy.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use pantry_core::{CartLine, Product, ProductId, ShopError, UserId};
use pantry_integration_tests::{seeded_service, service_with};

#[allow(clippy::unwrap_used)]
fn at(ms: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(ms).unwrap()
}

fn product(id: i32, stock: u32, sold: u64) -> Product {
    let mut p = Product::new(
        ProductId::new(id),
        format!("Product {id}"),
        Decimal::new(250, 2),
        stock,
    );
    p.sold_count = sold;
    p
}

// =============================================================================
// Buy / Cooldown Scenarios
// =============================================================================

#[tokio::test]
async fn buy_cooldown_buy_scenario() {
    let shop = service_with(vec![product(1, 10, 0)], 0);
    let user = UserId::from("u1");
    let pid = ProductId::new(1);

    // t=0: first buy goes through
    let (p, cart) = shop.buy_product(&user, pid, 3, at(0)).await.expect("first buy");
    assert_eq!((p.stock, p.sold_count), (7, 3));
    assert_eq!(cart, vec![CartLine { product_id: pid, quantity: 3 }]);

    // t=1ms: inside the 5s window, rejected without mutation
    let err = shop.buy_product(&user, pid, 3, at(1)).await.expect_err("cooldown");
    assert!(matches!(err, ShopError::CooldownActive { .. }));
    let p = shop.catalog().get(pid).await.expect("product");
    assert_eq!((p.stock, p.sold_count), (7, 3));

    // t=6000ms: past the window, the cart line merges
    let (p, cart) = shop.buy_product(&user, pid, 3, at(6000)).await.expect("second buy");
    assert_eq!((p.stock, p.sold_count), (4, 6));
    assert_eq!(cart, vec![CartLine { product_id: pid, quantity: 6 }]);
}

#[tokio::test]
async fn stock_never_goes_negative_across_sequences() {
    let shop = service_with(vec![product(1, 4, 0)], 0);
    let pid = ProductId::new(1);

    // Distinct users so the buy cooldown never gates the sequence
    for i in 0..10_i64 {
        let user = UserId::from(format!("u{i}"));
        let t = i * 10;
        let _ = shop.buy_product(&user, pid, 1, at(t)).await;
        let _ = shop.check_product(&user, pid, at(t + 5)).await;
    }

    // Four units existed, every later buy must have failed cleanly
    let p = shop.catalog().get(pid).await.expect("product");
    assert_eq!(p.sold_count, 4);
    assert_eq!(p.stock, 0);
}

#[tokio::test]
async fn overdraw_is_rejected_and_does_not_consume_cooldown() {
    let shop = service_with(vec![product(1, 5, 0)], 0);
    let user = UserId::from("u1");
    let pid = ProductId::new(1);

    let err = shop.buy_product(&user, pid, 9, at(0)).await.expect_err("overdraw");
    assert!(matches!(err, ShopError::InvalidQuantity { stock: 5, quantity: 9, .. }));

    // The rejected buy left no cooldown behind
    let (p, _) = shop.buy_product(&user, pid, 5, at(1)).await.expect("valid buy");
    assert_eq!(p.stock, 0);
}

#[tokio::test]
async fn unknown_product_changes_nothing_anywhere() {
    let shop = seeded_service(0);
    let user = UserId::from("u1");
    let before = shop.catalog().all().await;

    let err = shop
        .buy_product(&user, ProductId::new(999), 1, at(0))
        .await
        .expect_err("unknown id");
    assert_eq!(err, ShopError::NotFound(ProductId::new(999)));

    assert_eq!(shop.catalog().all().await, before);
    assert!(shop.cart(&user).await.lines.is_empty());
}

// =============================================================================
// Check Scenarios
// =============================================================================

#[tokio::test]
async fn check_window_is_two_minutes_per_product() {
    let shop = service_with(vec![product(1, 5, 0), product(2, 5, 0)], 1);
    let user = UserId::from("u1");

    let p = shop.check_product(&user, ProductId::new(1), at(0)).await.expect("check");
    assert_eq!(p.stock, 6);
    assert_eq!(p.last_checked, Some(at(0)));

    // Another product has its own window
    shop.check_product(&user, ProductId::new(2), at(1)).await.expect("other product");

    let err = shop
        .check_product(&user, ProductId::new(1), at(119_999))
        .await
        .expect_err("window closed");
    assert!(matches!(err, ShopError::CooldownActive { .. }));

    shop.check_product(&user, ProductId::new(1), at(120_001))
        .await
        .expect("window reopened");
}

// =============================================================================
// Ranking Scenarios
// =============================================================================

#[tokio::test]
async fn listing_returns_whole_catalog_exactly_once() {
    let shop = seeded_service(0);
    let user = UserId::from("u1");

    shop.toggle_favorite(&user, ProductId::new(4)).await.expect("favorite");
    shop.buy_product(&user, ProductId::new(9), 2, at(0)).await.expect("buy");

    let listing = shop.list_products(&user, None).await;
    let mut ids: Vec<i32> = listing.iter().map(|p| p.id.as_i32()).collect();
    assert_eq!(ids.len(), 12);
    ids.sort_unstable();
    assert_eq!(ids, (1..=12).collect::<Vec<_>>());

    // Personalized head: favorite first, then the cart product
    assert_eq!(listing.first().map(|p| p.id.as_i32()), Some(4));
    assert_eq!(listing.get(1).map(|p| p.id.as_i32()), Some(9));
}

#[tokio::test]
async fn listing_is_deterministic_between_calls() {
    let shop = seeded_service(0);
    let user = UserId::from("u1");
    shop.toggle_favorite(&user, ProductId::new(7)).await.expect("favorite");

    let first = shop.list_products(&user, None).await;
    let second = shop.list_products(&user, None).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn favorite_head_then_popularity_order() {
    // {A:sold=5, B:sold=50, C:sold=20}, favorites={C} => [C, B, A]
    let shop = service_with(
        vec![product(1, 5, 5), product(2, 5, 50), product(3, 5, 20)],
        0,
    );
    let user = UserId::from("u1");
    shop.toggle_favorite(&user, ProductId::new(3)).await.expect("favorite");

    let ids: Vec<i32> = shop
        .list_products(&user, None)
        .await
        .iter()
        .map(|p| p.id.as_i32())
        .collect();
    assert_eq!(ids, vec![3, 2, 1]);
}

// =============================================================================
// Favorites Scenarios
// =============================================================================

#[tokio::test]
async fn favorite_toggle_flips_back_to_original_state() {
    let shop = seeded_service(0);
    let user = UserId::from("u1");
    let pid = ProductId::new(6);

    let before = shop.catalog().get(pid).await.expect("product").favorite_count;
    shop.toggle_favorite(&user, pid).await.expect("first toggle");
    let favorites = shop.toggle_favorite(&user, pid).await.expect("second toggle");

    assert!(favorites.is_empty());
    let after = shop.catalog().get(pid).await.expect("product").favorite_count;
    assert_eq!(before, after);
}
