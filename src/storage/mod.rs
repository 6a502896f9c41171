//! Storage implementations for the two deployment variants
//!
//! The [`Store`] trait is the single persistence seam: handlers hold an
//! `Arc<dyn Store>` and never know which backend is active. Two
//! implementations exist, selected at startup and never mixed:
//!
//! - [`MongoStore`] — document-store mode, one collection per entity kind,
//!   uniqueness enforced by the store.
//! - [`FileStore`] — flat-file mode, the whole dataset in one JSON document
//!   reread and rewritten per request, with no uniqueness enforcement.

pub mod json_file;
pub mod mongo;

pub use json_file::FileStore;
pub use mongo::MongoStore;

use async_trait::async_trait;

use crate::core::Error;
use crate::entities::{
    Client, ClientInput, ClientPatch, Order, OrderInput, ProductType, ProductTypeInput,
};

/// Persistence contract shared by both backends.
///
/// Only clients are mutable; product types and orders are create-and-read
/// only. `update_client`/`delete_client` distinguish a malformed id
/// ([`Error::Validation`]) from a well-formed id with no matching record
/// ([`Error::NotFound`]).
#[async_trait]
pub trait Store: Send + Sync {
    // === Clients ===

    async fn list_clients(&self) -> Result<Vec<Client>, Error>;

    /// Insert a new client. Fails with [`Error::Conflict`] on a duplicate
    /// phone number in document-store mode; flat-file mode performs no
    /// uniqueness check.
    async fn create_client(&self, input: ClientInput) -> Result<Client, Error>;

    /// Overwrite the fields present in `patch` and refresh `updatedAt`.
    async fn update_client(&self, id: &str, patch: ClientPatch) -> Result<Client, Error>;

    async fn delete_client(&self, id: &str) -> Result<(), Error>;

    // === Product types ===

    async fn list_product_types(&self) -> Result<Vec<ProductType>, Error>;

    async fn create_product_type(&self, input: ProductTypeInput) -> Result<ProductType, Error>;

    /// Materialize the default garment categories when the store holds
    /// none. Idempotent; run once at startup.
    async fn ensure_default_product_types(&self) -> Result<(), Error>;

    // === Orders ===

    /// List all orders sorted by `orderDate` descending (most recent first).
    async fn list_orders(&self) -> Result<Vec<Order>, Error>;

    async fn create_order(&self, input: OrderInput) -> Result<Order, Error>;
}
