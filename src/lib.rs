//! # Darzi
//!
//! Business-management service for a tailoring shop: clients, product types
//! (garment categories), and orders with per-garment measurements, exposed
//! as a CRUD JSON API behind a static browser dashboard.
//!
//! ## Architecture
//!
//! - **Entities** ([`entities`]): serde record types plus the pure
//!   enriched-order-view assembly used by the dashboard listing.
//! - **Storage** ([`storage`]): one [`Store`](storage::Store) trait with two
//!   interchangeable backends — MongoDB for the long-lived deployment, a
//!   single JSON flat file for the ephemeral one. The backend is chosen at
//!   startup and injected into handlers; the two are never mixed.
//! - **Server** ([`server`]): axum router and handlers, a thin dispatch from
//!   HTTP verb + payload to a storage operation.
//! - **Errors** ([`core`]): one typed taxonomy (Validation / NotFound /
//!   Conflict / Connectivity / Unexpected) mapped to 400/404/409/500 at the
//!   handler boundary.
//!
//! Everything is request-driven: no background work, no queues, no retries.

pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod storage;

pub use crate::config::{AppConfig, StorageMode};
pub use crate::core::{Error, ErrorResponse};
pub use crate::server::{AppState, build_router};
pub use crate::storage::{FileStore, MongoStore, Store};
