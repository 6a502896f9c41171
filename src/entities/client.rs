//! Client records — customers identified primarily by phone number
//!
//! The phone number is the natural key used for search in the dashboard.
//! In document-store mode a unique index enforces it; the flat-file mode
//! performs no uniqueness check.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored client record.
///
/// Wire field names are camelCase; the id is an opaque string generated by
/// the storage backend (ObjectId hex in document-store mode, a prefixed
/// UUID in flat-file mode).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub phone_no: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for `POST /api/clients` — the record minus generated fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInput {
    pub phone_no: String,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Request body for `PUT /api/clients?id=…`.
///
/// Every field is optional: present fields overwrite the stored value,
/// absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Client {
    /// Build a new record from a create request, with backend-generated id
    /// and both timestamps set to `now`.
    pub fn new(id: String, input: ClientInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            phone_no: input.phone_no,
            name: input.name,
            address: input.address,
            email: input.email,
            notes: input.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

impl ClientPatch {
    /// Apply the patch in place, refreshing `updatedAt`.
    pub fn apply_to(&self, client: &mut Client, now: DateTime<Utc>) {
        if let Some(phone_no) = &self.phone_no {
            client.phone_no = phone_no.clone();
        }
        if let Some(name) = &self.name {
            client.name = name.clone();
        }
        if let Some(address) = &self.address {
            client.address = Some(address.clone());
        }
        if let Some(email) = &self.email {
            client.email = Some(email.clone());
        }
        if let Some(notes) = &self.notes {
            client.notes = Some(notes.clone());
        }
        client.updated_at = now;
    }
}
