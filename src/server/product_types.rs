//! Handlers for `/api/productTypes`
//!
//! Product types are create-and-read only. The default garment categories
//! are seeded by an explicit startup step, so listing here is a plain read.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use super::AppState;
use crate::core::Error;
use crate::entities::{ProductType, ProductTypeInput};

/// GET /api/productTypes
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ProductType>>, Error> {
    Ok(Json(state.store.list_product_types().await?))
}

/// POST /api/productTypes — 201; duplicate names conflict in store mode.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<ProductTypeInput>,
) -> Result<(StatusCode, Json<ProductType>), Error> {
    let product_type = state.store.create_product_type(input).await?;
    Ok((StatusCode::CREATED, Json(product_type)))
}
