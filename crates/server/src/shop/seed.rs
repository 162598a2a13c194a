//! Static seed catalog.
//!
//! The catalog loads from this fixed list at startup; there is no runtime
//! product management. Prices are in the shop currency with two decimal
//! places.

use rust_decimal::Decimal;

use pantry_core::{Product, ProductId};

fn item(id: i32, name: &str, price_cents: i64, stock: u32, sold: u64, description: &str) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        description: description.to_owned(),
        price: Decimal::new(price_cents, 2),
        stock,
        sold_count: sold,
        favorite_count: 0,
        last_checked: None,
    }
}

/// The default grocery catalog.
#[must_use]
pub fn default_catalog() -> Vec<Product> {
    vec![
        item(
            1,
            "Cocoa Powder",
            499,
            25,
            120,
            "Rich organic cocoa powder perfect for baking or hot chocolate.",
        ),
        item(
            2,
            "Whole Wheat Bread",
            250,
            80,
            300,
            "Freshly baked bread made with 100% whole wheat flour.",
        ),
        item(
            3,
            "Olive Oil (1L)",
            799,
            40,
            210,
            "Extra virgin olive oil imported from Spain.",
        ),
        item(
            4,
            "Cheddar Cheese",
            575,
            0,
            180,
            "Aged cheddar cheese with a sharp and creamy flavor.",
        ),
        item(
            5,
            "Bananas (1kg)",
            199,
            100,
            450,
            "Fresh ripe bananas, perfect for smoothies or snacking.",
        ),
        item(
            6,
            "Coffee Beans (500g)",
            899,
            35,
            260,
            "Premium roasted coffee beans with a strong aroma.",
        ),
        item(
            7,
            "Tomatoes (1kg)",
            220,
            50,
            320,
            "Fresh red tomatoes, perfect for salads or cooking.",
        ),
        item(
            8,
            "Mineral Water (6-pack)",
            399,
            60,
            150,
            "Natural mineral water bottled at the source.",
        ),
        item(
            9,
            "Pasta (500g)",
            150,
            120,
            390,
            "Durum wheat pasta that cooks perfectly al dente.",
        ),
        item(
            10,
            "Milk (1L)",
            120,
            75,
            280,
            "Fresh whole milk from local farms.",
        ),
        item(
            11,
            "Apples (1kg)",
            210,
            90,
            410,
            "Crisp and sweet seasonal apples.",
        ),
        item(
            12,
            "Eggs (12-pack)",
            320,
            70,
            340,
            "Free-range eggs, rich in flavor and nutrition.",
        ),
    ]
}
