//! MongoDB storage backend using the official MongoDB async driver.
//!
//! This is the long-lived-process deployment mode. The [`MongoStore`] owns a
//! `mongodb::Database` handle created once at startup and shared by every
//! request; the driver's own pooling handles concurrent use.
//!
//! # Storage model
//!
//! Collection-per-entity-kind: `clients`, `productTypes`, `orders`.
//! Uniqueness (`clients.phoneNo`, `productTypes.name`) is enforced by unique
//! indexes created idempotently at startup via [`MongoStore::ensure_indexes`];
//! a duplicate insert surfaces as [`Error::Conflict`].
//!
//! # Serialization strategy
//!
//! Entities are serialized via `serde_json::Value` as an intermediate format,
//! then converted to BSON documents. This keeps one consistent representation
//! for ids (opaque strings) and timestamps (RFC 3339 strings — which also
//! makes the `orderDate` sort a plain lexicographic one). The `id` field is
//! mapped to MongoDB's `_id` convention on the way in and back on the way
//! out.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document, doc};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Client as MongoClient, Database, IndexModel};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::Error;
use crate::entities::{
    Client, ClientInput, ClientPatch, DEFAULT_PRODUCT_TYPES, Order, OrderInput, ProductType,
    ProductTypeInput,
};
use crate::storage::Store;

const CLIENTS: &str = "clients";
const PRODUCT_TYPES: &str = "productTypes";
const ORDERS: &str = "orders";

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Convert a serde_json::Value (expected to be an Object) into a BSON
/// Document, renaming `id` → `_id` for MongoDB convention.
fn json_to_document(json: serde_json::Value) -> Result<Document> {
    let bson_val = mongodb::bson::to_bson(&json)
        .map_err(|e| anyhow!("Failed to convert JSON to BSON: {}", e))?;

    let mut document = match bson_val {
        Bson::Document(d) => d,
        _ => return Err(anyhow!("Expected BSON document, got non-object")),
    };

    if let Some(id) = document.remove("id") {
        document.insert("_id", id);
    }

    Ok(document)
}

/// Convert a BSON Document back into a serde_json::Value, renaming
/// `_id` → `id` for the domain convention.
fn document_to_json(mut document: Document) -> serde_json::Value {
    if let Some(id) = document.remove("_id") {
        document.insert("id", id);
    }

    Bson::Document(document).into_relaxed_extjson()
}

fn entity_to_document<T: Serialize>(entity: &T) -> Result<Document, Error> {
    let json = serde_json::to_value(entity)
        .map_err(|e| anyhow!("Failed to serialize record: {}", e))?;
    Ok(json_to_document(json)?)
}

fn document_to_entity<T: DeserializeOwned>(document: Document) -> Result<T, Error> {
    let json = document_to_json(document);
    serde_json::from_value(json)
        .map_err(|e| Error::Unexpected(anyhow!("Malformed stored record: {}", e)))
}

/// Translate a driver error into the service taxonomy.
///
/// Duplicate-key failures (code 11000) arrive as a write error on inserts
/// and as a command error on findAndModify; both map to Conflict. A failed
/// server selection means the store is unreachable.
fn map_mongo_error(err: mongodb::error::Error) -> Error {
    use mongodb::error::{ErrorKind, WriteFailure};

    match *err.kind {
        ErrorKind::Write(WriteFailure::WriteError(ref we)) if we.code == 11000 => {
            Error::Conflict(we.message.clone())
        }
        ErrorKind::Command(ref ce) if ce.code == 11000 => Error::Conflict(ce.message.clone()),
        ErrorKind::ServerSelection { .. } => Error::Connectivity(err.to_string()),
        _ => Error::Unexpected(anyhow::Error::new(err)),
    }
}

/// Validate an id query parameter as an ObjectId hex string.
///
/// Performed before any I/O so a malformed id is a Validation error,
/// distinct from a well-formed id that matches nothing (NotFound).
fn parse_object_id(id: &str, entity: &'static str) -> Result<(), Error> {
    ObjectId::parse_str(id)
        .map(|_| ())
        .map_err(|_| Error::Validation(format!("Invalid {} ID", entity.to_lowercase())))
}

// ---------------------------------------------------------------------------
// MongoStore
// ---------------------------------------------------------------------------

/// Document-store backend.
///
/// The database handle is an explicitly owned, startup-initialized resource
/// injected into handlers through [`AppState`](crate::server::AppState) —
/// there is no hidden module-level connection cache.
#[derive(Clone, Debug)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Wrap an existing database handle.
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Connect to the given URI and select the named database.
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self> {
        let client = MongoClient::with_uri_str(uri)
            .await
            .map_err(|e| anyhow!("MongoDB connection error: {}", e))?;
        Ok(Self::new(client.database(db_name)))
    }

    /// Get a reference to the underlying database.
    pub fn database(&self) -> &Database {
        &self.database
    }

    fn collection(&self, name: &str) -> mongodb::Collection<Document> {
        self.database.collection(name)
    }

    /// Create the unique indexes backing the store-enforced constraints:
    ///
    /// - `clients.phoneNo` — the natural client key
    /// - `productTypes.name` — one category per label
    ///
    /// Idempotent; safe to call on every startup.
    pub async fn ensure_indexes(&self) -> Result<()> {
        let unique = || IndexOptions::builder().unique(true).build();

        self.collection(CLIENTS)
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "phoneNo": 1 })
                    .options(unique())
                    .build(),
            )
            .await
            .map_err(|e| anyhow!("Failed to create clients.phoneNo index: {}", e))?;

        self.collection(PRODUCT_TYPES)
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "name": 1 })
                    .options(unique())
                    .build(),
            )
            .await
            .map_err(|e| anyhow!("Failed to create productTypes.name index: {}", e))?;

        Ok(())
    }

    /// Insert an entity and read it back to return the stored version.
    async fn insert<T>(&self, collection: &str, entity: &T) -> Result<T, Error>
    where
        T: Serialize + DeserializeOwned,
    {
        let document = entity_to_document(entity)?;
        let id = document
            .get("_id")
            .cloned()
            .ok_or_else(|| Error::Unexpected(anyhow!("Record has no id")))?;

        self.collection(collection)
            .insert_one(document)
            .await
            .map_err(map_mongo_error)?;

        let stored = self
            .collection(collection)
            .find_one(doc! { "_id": id })
            .await
            .map_err(map_mongo_error)?
            .ok_or_else(|| Error::Unexpected(anyhow!("Record not found after insert")))?;

        document_to_entity(stored)
    }

    /// Fetch every document in a collection, optionally sorted.
    async fn find_all<T>(&self, collection: &str, sort: Option<Document>) -> Result<Vec<T>, Error>
    where
        T: DeserializeOwned,
    {
        let coll = self.collection(collection);
        let mut find = coll.find(doc! {});
        if let Some(sort) = sort {
            find = find.sort(sort);
        }

        let documents: Vec<Document> = find
            .await
            .map_err(map_mongo_error)?
            .try_collect()
            .await
            .map_err(map_mongo_error)?;

        documents.into_iter().map(document_to_entity).collect()
    }
}

#[async_trait]
impl Store for MongoStore {
    async fn list_clients(&self) -> Result<Vec<Client>, Error> {
        self.find_all(CLIENTS, None).await
    }

    async fn create_client(&self, input: ClientInput) -> Result<Client, Error> {
        let client = Client::new(ObjectId::new().to_hex(), input, Utc::now());
        self.insert(CLIENTS, &client).await
    }

    async fn update_client(&self, id: &str, patch: ClientPatch) -> Result<Client, Error> {
        parse_object_id(id, "Client")?;

        // Only the fields present in the patch are written; serde skips the
        // absent ones, so the $set document stays minimal.
        let patch_json = serde_json::to_value(&patch)
            .map_err(|e| Error::Unexpected(anyhow!("Failed to serialize patch: {}", e)))?;
        let mut set = json_to_document(patch_json)?;
        set.insert(
            "updatedAt",
            mongodb::bson::to_bson(&Utc::now())
                .map_err(|e| Error::Unexpected(anyhow!("Failed to encode timestamp: {}", e)))?,
        );

        let updated = self
            .collection(CLIENTS)
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await
            .map_err(map_mongo_error)?
            .ok_or(Error::NotFound("Client"))?;

        document_to_entity(updated)
    }

    async fn delete_client(&self, id: &str) -> Result<(), Error> {
        parse_object_id(id, "Client")?;

        let result = self
            .collection(CLIENTS)
            .delete_one(doc! { "_id": id })
            .await
            .map_err(map_mongo_error)?;

        if result.deleted_count == 0 {
            return Err(Error::NotFound("Client"));
        }
        Ok(())
    }

    async fn list_product_types(&self) -> Result<Vec<ProductType>, Error> {
        self.find_all(PRODUCT_TYPES, None).await
    }

    async fn create_product_type(&self, input: ProductTypeInput) -> Result<ProductType, Error> {
        let product_type = ProductType::new(ObjectId::new().to_hex(), input);
        self.insert(PRODUCT_TYPES, &product_type).await
    }

    async fn ensure_default_product_types(&self) -> Result<(), Error> {
        let count = self
            .collection(PRODUCT_TYPES)
            .count_documents(doc! {})
            .await
            .map_err(map_mongo_error)?;
        if count > 0 {
            return Ok(());
        }

        let defaults: Vec<Document> = DEFAULT_PRODUCT_TYPES
            .iter()
            .map(|name| {
                entity_to_document(&ProductType::new(
                    ObjectId::new().to_hex(),
                    ProductTypeInput {
                        name: (*name).to_string(),
                    },
                ))
            })
            .collect::<Result<_, _>>()?;

        self.collection(PRODUCT_TYPES)
            .insert_many(defaults)
            .await
            .map_err(map_mongo_error)?;

        tracing::info!("Seeded default product types");
        Ok(())
    }

    async fn list_orders(&self) -> Result<Vec<Order>, Error> {
        self.find_all(ORDERS, Some(doc! { "orderDate": -1 })).await
    }

    async fn create_order(&self, input: OrderInput) -> Result<Order, Error> {
        let order = Order::new(ObjectId::new().to_hex(), input, Utc::now());
        self.insert(ORDERS, &order).await
    }
}
