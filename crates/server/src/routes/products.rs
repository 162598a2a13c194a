//! Product route handlers: ranked listing, stock checks, purchases.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use pantry_core::{CartLine, Product, ProductId};

use crate::error::Result;
use crate::middleware::CurrentUser;
use crate::state::AppState;

/// Listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive name filter applied before ranking.
    pub q: Option<String>,
}

/// Buy request body.
#[derive(Debug, Deserialize)]
pub struct BuyRequest {
    pub quantity: u32,
}

/// Buy response: the updated product and the user's cart after the purchase.
#[derive(Debug, Serialize)]
pub struct BuyResponse {
    pub product: Product,
    pub cart: Vec<CartLine>,
}

/// Ranked product listing for the requesting user.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<ListQuery>,
) -> Json<Vec<Product>> {
    let products = state
        .shop()
        .list_products(&user, query.q.as_deref())
        .await;
    Json(products)
}

/// Request a stock re-count.
#[instrument(skip(state))]
pub async fn check(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
) -> Result<Json<Product>> {
    let product = state
        .shop()
        .check_product(&user, ProductId::new(id), Utc::now())
        .await?;
    Ok(Json(product))
}

/// Buy a quantity of a product.
#[instrument(skip(state))]
pub async fn buy(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
    Json(body): Json<BuyRequest>,
) -> Result<Json<BuyResponse>> {
    let (product, cart) = state
        .shop()
        .buy_product(&user, ProductId::new(id), body.quantity, Utc::now())
        .await?;
    Ok(Json(BuyResponse { product, cart }))
}
