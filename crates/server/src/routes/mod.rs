//! Route definitions.

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

pub mod cart;
pub mod favorites;
pub mod products;
pub mod report;

/// All API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(products::index))
        .route("/api/products/{id}/check", post(products::check))
        .route("/api/products/{id}/buy", post(products::buy))
        .route("/api/products/{id}/favorite", post(favorites::toggle))
        .route("/api/cart", get(cart::show).post(cart::update))
        .route("/api/report", post(report::submit))
}
