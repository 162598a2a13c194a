//! Cart route handlers.

use axum::{Json, extract::State};
use serde::Deserialize;
use tracing::instrument;

use pantry_core::ProductId;

use crate::error::Result;
use crate::middleware::CurrentUser;
use crate::shop::CartView;
use crate::state::AppState;

/// Cart line update body. Quantity zero removes the line.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartRequest {
    pub product_id: i32,
    pub quantity: u32,
}

/// The user's cart with line totals and the grand total.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Json<CartView> {
    Json(state.shop().cart(&user).await)
}

/// Set one cart line's quantity outright.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<UpdateCartRequest>,
) -> Result<Json<CartView>> {
    let view = state
        .shop()
        .set_cart_line(&user, ProductId::new(body.product_id), body.quantity)
        .await?;
    Ok(Json(view))
}
