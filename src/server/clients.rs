//! Handlers for `/api/clients` — the only fully mutable entity kind

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde_json::{Value, json};

use super::{AppState, IdQuery};
use crate::core::Error;
use crate::entities::{Client, ClientInput, ClientPatch};

/// GET /api/clients
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Client>>, Error> {
    Ok(Json(state.store.list_clients().await?))
}

/// POST /api/clients — 201 with the stored record.
///
/// Duplicate phone numbers are rejected by the store in document-store mode.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<ClientInput>,
) -> Result<(StatusCode, Json<Client>), Error> {
    let client = state.store.create_client(input).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

/// PUT /api/clients?id=… — 400 on a malformed id, 404 on an absent one.
pub async fn update(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
    Json(patch): Json<ClientPatch>,
) -> Result<Json<Client>, Error> {
    let id = query.require("Client")?;
    Ok(Json(state.store.update_client(&id, patch).await?))
}

/// DELETE /api/clients?id=… — 200 with a confirmation message.
pub async fn remove(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<Value>, Error> {
    let id = query.require("Client")?;
    state.store.delete_client(&id).await?;
    Ok(Json(json!({ "message": "Client deleted successfully" })))
}
