//! HTTP surface: application state, router assembly, request handlers
//!
//! One handler module per entity kind, each a thin dispatch from HTTP verb
//! and payload to a [`Store`] operation. All handlers share [`AppState`] and
//! translate errors at the boundary via the typed error's `IntoResponse`.

pub mod clients;
pub mod orders;
pub mod product_types;

use std::path::Path;
use std::sync::Arc;

use axum::http::{Method, header::CONTENT_TYPE};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::core::Error;
use crate::storage::Store;

/// Application state shared across handlers.
///
/// The store is the explicitly owned storage resource selected at startup;
/// handlers never reach for a hidden global connection.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
}

/// Query string carrying the target record id (`?id=…`).
///
/// The id is optional at the type level so that its absence surfaces as a
/// Validation error rather than a generic extractor rejection.
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

impl IdQuery {
    /// The id, or a Validation error naming the entity kind.
    pub fn require(self, entity: &str) -> Result<String, Error> {
        self.id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::Validation(format!("Missing {} id", entity.to_lowercase())))
    }
}

/// Build the full application router: the JSON API, permissive CORS,
/// request tracing, and the static dashboard with an index fallback.
pub fn build_router(state: AppState, public_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE]);

    let api = Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/clients",
            get(clients::list)
                .post(clients::create)
                .put(clients::update)
                .delete(clients::remove),
        )
        .route(
            "/api/productTypes",
            get(product_types::list).post(product_types::create),
        )
        .route("/api/orders", get(orders::list).post(orders::create))
        .with_state(state);

    let dashboard =
        ServeDir::new(public_dir).not_found_service(ServeFile::new(public_dir.join("index.html")));

    api.fallback_service(dashboard)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "darzi"
    }))
}
