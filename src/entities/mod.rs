//! Entity schemas for the three record kinds the shop tracks
//!
//! Each entity module defines the stored record, the request-body shapes
//! derived from it, and any pure transformations over it. Storage backends
//! and handlers both work exclusively in terms of these types.

pub mod client;
pub mod order;
pub mod product_type;

pub use client::{Client, ClientInput, ClientPatch};
pub use order::{
    LineItem, LineItemView, Order, OrderInput, OrderStatus, OrderView, assemble_order_views,
};
pub use product_type::{DEFAULT_PRODUCT_TYPES, ProductType, ProductTypeInput};
