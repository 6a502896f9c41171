//! Handlers for `/api/orders`
//!
//! Orders are create-and-read only; the listing is the enriched dashboard
//! view with reference ids resolved to display names.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use super::AppState;
use crate::core::Error;
use crate::entities::{Order, OrderInput, OrderView, assemble_order_views};

/// GET /api/orders — enriched views, most recent order first.
///
/// The store returns orders already sorted by `orderDate` descending; the
/// join against clients and product types is a pure transformation, so the
/// response is deterministic given the same underlying records.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<OrderView>>, Error> {
    let orders = state.store.list_orders().await?;
    let clients = state.store.list_clients().await?;
    let product_types = state.store.list_product_types().await?;

    Ok(Json(assemble_order_views(&orders, &clients, &product_types)))
}

/// POST /api/orders — 201 with the stored record.
///
/// Referenced client and product ids are not verified to exist; a dangling
/// reference is accepted and only surfaces as an "Unknown …" label when the
/// listing resolves it.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<OrderInput>,
) -> Result<(StatusCode, Json<Order>), Error> {
    let order = state.store.create_order(input).await?;
    Ok((StatusCode::CREATED, Json(order)))
}
