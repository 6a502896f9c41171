//! Orders — a client's garments with per-item measurements and status
//!
//! An order references exactly one client and carries an ordered sequence of
//! line items, each referencing a product type. References are not verified
//! at creation time; a dangling reference surfaces at read time as an
//! "Unknown Client" / "Unknown Product" label in the enriched listing
//! produced by [`assemble_order_views`], never as a request failure.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::client::Client;
use super::product_type::ProductType;

/// Fallback label when an order references a client that no longer exists.
pub const UNKNOWN_CLIENT: &str = "Unknown Client";
/// Fallback label when a line item references a deleted product type.
pub const UNKNOWN_PRODUCT: &str = "Unknown Product";

/// Fulfillment status, tracked as a plain field value.
///
/// There is no server-side state machine: the status is written once at
/// creation (orders expose no update operation) and any of the five labels
/// may be supplied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    Received,
    #[serde(rename = "In Progress")]
    InProgress,
    Ready,
    Delivered,
    Cancelled,
}

/// One garment on an order.
///
/// `measurements` is an open name → value mapping whose keys depend on the
/// product type; it is stored and returned untouched, never validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: String,
    #[serde(default)]
    pub measurements: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A stored order record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub client_id: String,
    pub order_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<DateTime<Utc>>,
    pub status: OrderStatus,
    pub products: Vec<LineItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for `POST /api/orders`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInput {
    pub client_id: String,
    #[serde(default)]
    pub order_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub delivery_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: OrderStatus,
    pub products: Vec<LineItem>,
}

impl Order {
    /// Build a new record from a create request. `orderDate` defaults to
    /// `now` when the body omits it.
    pub fn new(id: String, input: OrderInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            client_id: input.client_id,
            order_date: input.order_date.unwrap_or(now),
            delivery_date: input.delivery_date,
            status: input.status,
            products: input.products,
            created_at: now,
            updated_at: now,
        }
    }
}

// ---------------------------------------------------------------------------
// Enriched order views
// ---------------------------------------------------------------------------

/// An order as the dashboard displays it: reference ids replaced by
/// human-readable resolved names.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub id: String,
    pub client_name: String,
    pub order_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<DateTime<Utc>>,
    pub status: OrderStatus,
    pub products: Vec<LineItemView>,
}

/// A line item with its product type resolved to a name; measurements and
/// notes pass through unchanged.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemView {
    pub product_type_name: String,
    pub measurements: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Join orders against clients and product types for display.
///
/// Pure transformation: the output order matches the input order (the
/// storage layer already sorts by `orderDate` descending), the client
/// resolves to `"<name> (<phoneNo>)"` or [`UNKNOWN_CLIENT`], and each line
/// item's product id resolves to the type name or [`UNKNOWN_PRODUCT`].
pub fn assemble_order_views(
    orders: &[Order],
    clients: &[Client],
    product_types: &[ProductType],
) -> Vec<OrderView> {
    let clients_by_id: HashMap<&str, &Client> =
        clients.iter().map(|c| (c.id.as_str(), c)).collect();
    let type_names_by_id: HashMap<&str, &str> = product_types
        .iter()
        .map(|pt| (pt.id.as_str(), pt.name.as_str()))
        .collect();

    orders
        .iter()
        .map(|order| OrderView {
            id: order.id.clone(),
            client_name: clients_by_id
                .get(order.client_id.as_str())
                .map(|c| format!("{} ({})", c.name, c.phone_no))
                .unwrap_or_else(|| UNKNOWN_CLIENT.to_string()),
            order_date: order.order_date,
            delivery_date: order.delivery_date,
            status: order.status,
            products: order
                .products
                .iter()
                .map(|item| LineItemView {
                    product_type_name: type_names_by_id
                        .get(item.product_id.as_str())
                        .map(|name| name.to_string())
                        .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string()),
                    measurements: item.measurements.clone(),
                    notes: item.notes.clone(),
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::client::ClientInput;
    use crate::entities::product_type::ProductTypeInput;
    use serde_json::json;

    fn client(id: &str, name: &str, phone: &str) -> Client {
        Client::new(
            id.to_string(),
            ClientInput {
                phone_no: phone.to_string(),
                name: name.to_string(),
                address: None,
                email: None,
                notes: None,
            },
            Utc::now(),
        )
    }

    fn product_type(id: &str, name: &str) -> ProductType {
        ProductType::new(
            id.to_string(),
            ProductTypeInput {
                name: name.to_string(),
            },
        )
    }

    fn order(id: &str, client_id: &str, products: Vec<LineItem>) -> Order {
        Order::new(
            id.to_string(),
            OrderInput {
                client_id: client_id.to_string(),
                order_date: None,
                delivery_date: None,
                status: OrderStatus::default(),
                products,
            },
            Utc::now(),
        )
    }

    #[test]
    fn status_wire_labels_match_the_enumeration() {
        let labels: Vec<String> = [
            OrderStatus::Received,
            OrderStatus::InProgress,
            OrderStatus::Ready,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ]
        .iter()
        .map(|s| serde_json::to_value(s).unwrap().as_str().unwrap().to_string())
        .collect();

        assert_eq!(
            labels,
            ["Received", "In Progress", "Ready", "Delivered", "Cancelled"]
        );
    }

    #[test]
    fn unknown_status_label_is_rejected() {
        let result: Result<OrderStatus, _> = serde_json::from_value(json!("Shipped"));
        assert!(result.is_err());
    }

    #[test]
    fn order_date_defaults_to_creation_time() {
        let o = order("ord1", "cl1", vec![]);
        assert_eq!(o.order_date, o.created_at);
        assert_eq!(o.status, OrderStatus::Received);
    }

    #[test]
    fn view_resolves_client_to_name_and_phone() {
        let clients = vec![client("cl1", "A. Tailor", "555-1234")];
        let orders = vec![order("ord1", "cl1", vec![])];

        let views = assemble_order_views(&orders, &clients, &[]);
        assert_eq!(views[0].client_name, "A. Tailor (555-1234)");
    }

    #[test]
    fn dangling_client_reference_yields_unknown_label() {
        let orders = vec![order("ord1", "cl-gone", vec![])];
        let views = assemble_order_views(&orders, &[], &[]);
        assert_eq!(views[0].client_name, UNKNOWN_CLIENT);
    }

    #[test]
    fn dangling_product_reference_yields_unknown_label() {
        let item = LineItem {
            product_id: "pt-gone".to_string(),
            measurements: json!({}),
            notes: None,
        };
        let orders = vec![order("ord1", "cl1", vec![item])];

        let views = assemble_order_views(&orders, &[], &[]);
        assert_eq!(views[0].products[0].product_type_name, UNKNOWN_PRODUCT);
    }

    #[test]
    fn measurements_and_notes_pass_through_unchanged() {
        let item = LineItem {
            product_id: "pt1".to_string(),
            measurements: json!({"chest": "40", "sleeve": "24.5"}),
            notes: Some("double stitch".to_string()),
        };
        let orders = vec![order("ord1", "cl1", vec![item])];
        let types = vec![product_type("pt1", "Shirt")];

        let views = assemble_order_views(&orders, &[], &types);
        let product = &views[0].products[0];
        assert_eq!(product.product_type_name, "Shirt");
        assert_eq!(product.measurements, json!({"chest": "40", "sleeve": "24.5"}));
        assert_eq!(product.notes.as_deref(), Some("double stitch"));
    }

    #[test]
    fn view_preserves_input_order() {
        let orders = vec![
            order("ord2", "cl1", vec![]),
            order("ord1", "cl1", vec![]),
        ];
        let views = assemble_order_views(&orders, &[], &[]);
        assert_eq!(views[0].id, "ord2");
        assert_eq!(views[1].id, "ord1");
    }
}
