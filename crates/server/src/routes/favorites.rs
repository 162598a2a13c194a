//! Favorites route handler.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;

use pantry_core::ProductId;

use crate::error::Result;
use crate::middleware::CurrentUser;
use crate::state::AppState;

/// The user's favorites after a toggle, in insertion order.
#[derive(Debug, Serialize)]
pub struct FavoritesResponse {
    pub favorites: Vec<ProductId>,
}

/// Flip a product in or out of the user's favorites.
#[instrument(skip(state))]
pub async fn toggle(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
) -> Result<Json<FavoritesResponse>> {
    let favorites = state
        .shop()
        .toggle_favorite(&user, ProductId::new(id))
        .await?;
    Ok(Json(FavoritesResponse { favorites }))
}
