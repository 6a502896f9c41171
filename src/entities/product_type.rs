//! Product types — garment categories used to tag order line items

use serde::{Deserialize, Serialize};

/// The categories materialized on first run against an empty store.
pub const DEFAULT_PRODUCT_TYPES: [&str; 4] = ["Shirt", "Kurta", "Pant", "Jacket"];

/// A garment category label (e.g. "Shirt", "Pant").
///
/// Unlike [`Client`](crate::entities::Client) and
/// [`Order`](crate::entities::Order), product types carry no timestamps.
/// The name is unique in document-store mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductType {
    pub id: String,
    pub name: String,
}

/// Request body for `POST /api/productTypes`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductTypeInput {
    pub name: String,
}

impl ProductType {
    pub fn new(id: String, input: ProductTypeInput) -> Self {
        Self {
            id,
            name: input.name,
        }
    }
}
