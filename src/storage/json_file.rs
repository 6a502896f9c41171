//! Flat-file storage backend: the whole dataset in one JSON document.
//!
//! This is the read-only/ephemeral deployment mode. Every operation reads
//! and parses the entire file; every mutation rewrites it wholesale. An
//! absent file is an empty dataset, not an error.
//!
//! Known, accepted limitations of this mode (they are properties of the
//! deployment target, not bugs to fix here):
//!
//! - no uniqueness enforcement — duplicate phone numbers are stored as-is
//! - no partial-write protection — a crash mid-write can corrupt the file
//! - no coordination between concurrent writers — last rewrite wins, and a
//!   short-lived execution environment may discard the file entirely
//!
//! Ids are `<prefix><uuid>` (e.g. `cl3f2a…`, `ord9b41…`) — an opaque string
//! with a collision-resistant tail, unlike the timestamp-based ids this
//! format descends from. Any non-empty id is considered well-formed in this
//! mode, so lookups that miss report NotFound rather than Validation.

use std::path::PathBuf;

use anyhow::{Context, anyhow};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::Error;
use crate::entities::{
    Client, ClientInput, ClientPatch, DEFAULT_PRODUCT_TYPES, Order, OrderInput, ProductType,
    ProductTypeInput,
};
use crate::storage::Store;

/// On-disk layout: three top-level arrays.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct DataFile {
    clients: Vec<Client>,
    orders: Vec<Order>,
    product_types: Vec<ProductType>,
}

/// Flat-file backend over a single JSON document.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read and parse the whole dataset. A missing file yields the empty
    /// dataset; an unreadable or unparsable one is an Unexpected error.
    fn read(&self) -> Result<DataFile, Error> {
        if !self.path.exists() {
            return Ok(DataFile::default());
        }

        let raw = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read data file {}", self.path.display()))?;
        let data = serde_json::from_str(&raw)
            .map_err(|e| anyhow!("Malformed data file {}: {}", self.path.display(), e))?;
        Ok(data)
    }

    /// Rewrite the whole dataset. Not atomic.
    fn write(&self, data: &DataFile) -> Result<(), Error> {
        let raw = serde_json::to_string_pretty(data)
            .map_err(|e| anyhow!("Failed to serialize dataset: {}", e))?;
        std::fs::write(&self.path, raw)
            .with_context(|| format!("Failed to write data file {}", self.path.display()))?;
        Ok(())
    }

    fn generate_id(prefix: &str) -> String {
        format!("{}{}", prefix, Uuid::new_v4().simple())
    }
}

#[async_trait]
impl Store for FileStore {
    async fn list_clients(&self) -> Result<Vec<Client>, Error> {
        Ok(self.read()?.clients)
    }

    async fn create_client(&self, input: ClientInput) -> Result<Client, Error> {
        let mut data = self.read()?;
        let client = Client::new(Self::generate_id("cl"), input, Utc::now());
        data.clients.push(client.clone());
        self.write(&data)?;
        Ok(client)
    }

    async fn update_client(&self, id: &str, patch: ClientPatch) -> Result<Client, Error> {
        let mut data = self.read()?;
        let client = data
            .clients
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(Error::NotFound("Client"))?;

        patch.apply_to(client, Utc::now());
        let updated = client.clone();
        self.write(&data)?;
        Ok(updated)
    }

    async fn delete_client(&self, id: &str) -> Result<(), Error> {
        let mut data = self.read()?;
        let before = data.clients.len();
        data.clients.retain(|c| c.id != id);
        if data.clients.len() == before {
            return Err(Error::NotFound("Client"));
        }
        self.write(&data)
    }

    async fn list_product_types(&self) -> Result<Vec<ProductType>, Error> {
        Ok(self.read()?.product_types)
    }

    async fn create_product_type(&self, input: ProductTypeInput) -> Result<ProductType, Error> {
        let mut data = self.read()?;
        let product_type = ProductType::new(Self::generate_id("pt"), input);
        data.product_types.push(product_type.clone());
        self.write(&data)?;
        Ok(product_type)
    }

    async fn ensure_default_product_types(&self) -> Result<(), Error> {
        let mut data = self.read()?;
        if !data.product_types.is_empty() {
            return Ok(());
        }

        for name in DEFAULT_PRODUCT_TYPES {
            data.product_types.push(ProductType::new(
                Self::generate_id("pt"),
                ProductTypeInput {
                    name: name.to_string(),
                },
            ));
        }
        self.write(&data)?;

        tracing::info!("Seeded default product types");
        Ok(())
    }

    async fn list_orders(&self) -> Result<Vec<Order>, Error> {
        let mut orders = self.read()?.orders;
        orders.sort_by(|a, b| b.order_date.cmp(&a.order_date));
        Ok(orders)
    }

    async fn create_order(&self, input: OrderInput) -> Result<Order, Error> {
        let mut data = self.read()?;
        let order = Order::new(Self::generate_id("ord"), input, Utc::now());
        data.orders.push(order.clone());
        self.write(&data)?;
        Ok(order)
    }
}
