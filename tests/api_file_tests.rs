//! End-to-end API tests over the flat-file storage backend.
//!
//! These drive the real router through `axum_test::TestServer`, with the
//! dataset on a temporary path per test. Store-mode-only behaviors
//! (uniqueness conflicts, ObjectId format validation) live in
//! `mongo_tests.rs`; everything here holds in both modes.

use std::sync::Arc;

use axum::http::{HeaderValue, Method, StatusCode, header};
use axum_test::TestServer;
use serde_json::{Value, json};
use tempfile::TempDir;

use darzi::server::{AppState, build_router};
use darzi::storage::{FileStore, Store};

/// Build a server over a fresh flat-file store, with the default product
/// types seeded the way startup does.
async fn setup() -> (TestServer, Arc<FileStore>, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::new(dir.path().join("data.json")));
    store.ensure_default_product_types().await.unwrap();

    let app = build_router(
        AppState {
            store: store.clone(),
        },
        dir.path(),
    );
    (TestServer::new(app), store, dir)
}

async fn create_client(server: &TestServer, phone: &str, name: &str) -> Value {
    let response = server
        .post("/api/clients")
        .json(&json!({ "phoneNo": phone, "name": name }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()
}

// ---------------------------------------------------------------------------
// Clients
// ---------------------------------------------------------------------------

#[tokio::test]
async fn created_client_carries_generated_fields_and_appears_in_the_list() {
    let (server, _store, _dir) = setup().await;

    let created = create_client(&server, "555-1234", "A. Tailor").await;
    assert_eq!(created["phoneNo"], "555-1234");
    assert_eq!(created["name"], "A. Tailor");
    assert!(created["id"].as_str().unwrap().starts_with("cl"));
    assert!(created.get("createdAt").is_some());
    assert!(created.get("updatedAt").is_some());

    let listed = server.get("/api/clients").await.json::<Vec<Value>>();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], created["id"]);
}

#[tokio::test]
async fn client_create_without_required_fields_is_rejected() {
    let (server, _store, _dir) = setup().await;

    let response = server
        .post("/api/clients")
        .json(&json!({ "name": "No Phone" }))
        .await;
    assert!(response.status_code().is_client_error());

    let listed = server.get("/api/clients").await.json::<Vec<Value>>();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn update_overwrites_present_fields_and_keeps_the_rest() {
    let (server, _store, _dir) = setup().await;
    let created = create_client(&server, "555-1234", "A. Tailor").await;
    let id = created["id"].as_str().unwrap();

    let response = server
        .put("/api/clients")
        .add_query_param("id", id)
        .json(&json!({ "address": "12 Bazaar Lane" }))
        .await;
    response.assert_status_ok();

    let updated = response.json::<Value>();
    assert_eq!(updated["address"], "12 Bazaar Lane");
    assert_eq!(updated["name"], "A. Tailor");
    assert_eq!(updated["phoneNo"], "555-1234");
    assert_eq!(updated["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn update_of_an_absent_id_is_404() {
    let (server, _store, _dir) = setup().await;

    let response = server
        .put("/api/clients")
        .add_query_param("id", "cl00000000000000000000000000000000")
        .json(&json!({ "name": "Nobody" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["message"], "Client not found");
}

#[tokio::test]
async fn update_without_an_id_parameter_is_400() {
    let (server, _store, _dir) = setup().await;

    let response = server
        .put("/api/clients")
        .json(&json!({ "name": "Nobody" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["message"], "Missing client id");
}

#[tokio::test]
async fn delete_confirms_then_404s_on_repeat() {
    let (server, _store, _dir) = setup().await;
    let created = create_client(&server, "555-1234", "A. Tailor").await;
    let id = created["id"].as_str().unwrap();

    let response = server.delete("/api/clients").add_query_param("id", id).await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["message"],
        "Client deleted successfully"
    );
    assert!(server.get("/api/clients").await.json::<Vec<Value>>().is_empty());

    let response = server.delete("/api/clients").add_query_param("id", id).await;
    response.assert_status(StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Product types
// ---------------------------------------------------------------------------

#[tokio::test]
async fn listing_product_types_returns_the_seeded_defaults_idempotently() {
    let (server, store, _dir) = setup().await;

    let first = server.get("/api/productTypes").await.json::<Vec<Value>>();
    let names: Vec<&str> = first.iter().map(|pt| pt["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["Shirt", "Kurta", "Pant", "Jacket"]);

    // A second seeding pass (a restart) must not duplicate the defaults.
    store.ensure_default_product_types().await.unwrap();
    let second = server.get("/api/productTypes").await.json::<Vec<Value>>();
    assert_eq!(second.len(), 4);
}

#[tokio::test]
async fn creating_a_product_type_returns_201() {
    let (server, _store, _dir) = setup().await;

    let response = server
        .post("/api/productTypes")
        .json(&json!({ "name": "Sherwani" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["name"], "Sherwani");

    let listed = server.get("/api/productTypes").await.json::<Vec<Value>>();
    assert_eq!(listed.len(), 5);
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

#[tokio::test]
async fn order_round_trip_resolves_names_and_preserves_measurements() {
    let (server, _store, _dir) = setup().await;
    let client = create_client(&server, "555-1234", "A. Tailor").await;
    let client_id = client["id"].as_str().unwrap();

    let types = server.get("/api/productTypes").await.json::<Vec<Value>>();
    let shirt_id = types
        .iter()
        .find(|pt| pt["name"] == "Shirt")
        .unwrap()["id"]
        .as_str()
        .unwrap();

    let response = server
        .post("/api/orders")
        .json(&json!({
            "clientId": client_id,
            "products": [
                { "productId": shirt_id, "measurements": { "chest": "40" }, "notes": "" }
            ]
        }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let created = response.json::<Value>();
    assert!(created["id"].as_str().unwrap().starts_with("ord"));
    assert_eq!(created["status"], "Received");
    assert!(created.get("orderDate").is_some());

    let views = server.get("/api/orders").await.json::<Vec<Value>>();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0]["clientName"], "A. Tailor (555-1234)");

    let product = &views[0]["products"][0];
    assert_eq!(product["productTypeName"], "Shirt");
    assert_eq!(product["measurements"], json!({ "chest": "40" }));
    assert_eq!(product["notes"], "");
}

#[tokio::test]
async fn orders_are_listed_most_recent_first() {
    let (server, _store, _dir) = setup().await;

    for date in ["2024-01-10T09:00:00Z", "2025-06-01T09:00:00Z"] {
        server
            .post("/api/orders")
            .json(&json!({ "clientId": "cl1", "orderDate": date, "products": [] }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let views = server.get("/api/orders").await.json::<Vec<Value>>();
    assert_eq!(views.len(), 2);
    let first = views[0]["orderDate"].as_str().unwrap();
    let second = views[1]["orderDate"].as_str().unwrap();
    assert!(first.starts_with("2025-06-01"));
    assert!(second.starts_with("2024-01-10"));
}

#[tokio::test]
async fn dangling_references_surface_as_unknown_labels_not_failures() {
    let (server, _store, _dir) = setup().await;
    let client = create_client(&server, "555-1234", "A. Tailor").await;
    let client_id = client["id"].as_str().unwrap().to_string();

    server
        .post("/api/orders")
        .json(&json!({
            "clientId": client_id,
            "products": [{ "productId": "pt-gone", "measurements": {} }]
        }))
        .await
        .assert_status(StatusCode::CREATED);

    // Deleting the client afterwards leaves the order's reference dangling.
    server
        .delete("/api/clients")
        .add_query_param("id", &client_id)
        .await
        .assert_status_ok();

    let response = server.get("/api/orders").await;
    response.assert_status_ok();

    let views = response.json::<Vec<Value>>();
    assert_eq!(views[0]["clientName"], "Unknown Client");
    assert_eq!(views[0]["products"][0]["productTypeName"], "Unknown Product");
}

#[tokio::test]
async fn order_status_outside_the_enumeration_is_rejected() {
    let (server, _store, _dir) = setup().await;

    let response = server
        .post("/api/orders")
        .json(&json!({ "clientId": "cl1", "status": "Shipped", "products": [] }))
        .await;
    assert!(response.status_code().is_client_error());
}

// ---------------------------------------------------------------------------
// Route-level behavior
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unsupported_methods_are_405() {
    let (server, _store, _dir) = setup().await;

    server
        .patch("/api/clients")
        .json(&json!({}))
        .await
        .assert_status(StatusCode::METHOD_NOT_ALLOWED);
    server
        .delete("/api/orders")
        .await
        .assert_status(StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn preflight_requests_are_acknowledged_with_200() {
    let (server, _store, _dir) = setup().await;

    let response = server
        .method(Method::OPTIONS, "/api/clients")
        .add_header(header::ORIGIN, HeaderValue::from_static("http://localhost:5500"))
        .add_header(
            header::ACCESS_CONTROL_REQUEST_METHOD,
            HeaderValue::from_static("POST"),
        )
        .await;
    response.assert_status_ok();
    assert!(
        response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
    );
}

#[tokio::test]
async fn health_check_reports_ok() {
    let (server, _store, _dir) = setup().await;

    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "ok");
}
