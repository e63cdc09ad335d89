//! REST API handlers for shopping cart operations
//!
//! This module implements HTTP endpoints for reading, filling and
//! submitting a user's cart.

use super::{helpers::*, models::*, state::SharedState};
use crate::error::AppError;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

/// Creates routes for cart-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/carts/:username", get(show_cart))
        .route("/carts/:username/lines", post(add_lines))
        .route("/carts/:username/checkout", post(checkout))
}

/// Endpoint: GET /carts/:username
/// Returns the cart merged with live catalog data.
async fn show_cart(
    State(state): State<SharedState>,
    Path(username): Path<String>,
) -> Result<Json<CartDisplay>, AppError> {
    validate_username(&username)?;

    let display = state.enrichment.enrich_user(&state.carts, &username).await;
    Ok(Json(display))
}

/// Endpoint: POST /carts/:username/lines
/// Adds lines to the cart, aggregating quantities for known articles.
async fn add_lines(
    State(state): State<SharedState>,
    Path(username): Path<String>,
    Json(payload): Json<AddLinesRequest>,
) -> Result<Json<Cart>, AppError> {
    validate_username(&username)?;
    let lines = validate_lines(payload.items)?;

    let cart = state.carts.add_lines(&username, &lines);
    tracing::info!(
        username = %username,
        added = %format_line_summary(&lines),
        "REST cart update"
    );

    Ok(Json(cart))
}

/// Endpoint: POST /carts/:username/checkout
/// Submits the cart as an order and empties it.
async fn checkout(
    State(state): State<SharedState>,
    Path(username): Path<String>,
) -> Result<Json<CheckoutResponse>, AppError> {
    validate_username(&username)?;

    let order = state.orders.submit(&username);

    Ok(Json(CheckoutResponse {
        status: "submitted".to_string(),
        order_id: order.order_id,
    }))
}
