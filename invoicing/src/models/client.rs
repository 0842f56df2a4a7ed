//! Client models.

use serde::{Deserialize, Serialize};

/// A billable client owned by one issuer. Identity and timestamps live in
/// the store envelope; every other field is mutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: String,
    pub gstin: Option<String>,
}

/// Client details copied into an invoice at write time.
///
/// A snapshot, not a live reference: later edits to the client record leave
/// issued invoices untouched, and deleting the client does not cascade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientSnapshot {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: String,
    pub gstin: Option<String>,
}

impl From<&Client> for ClientSnapshot {
    fn from(client: &Client) -> Self {
        Self {
            name: client.name.clone(),
            email: client.email.clone(),
            phone: client.phone.clone(),
            address: client.address.clone(),
            gstin: client.gstin.clone(),
        }
    }
}

/// Input for creating a client.
#[derive(Debug, Clone)]
pub struct CreateClient {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: String,
    pub gstin: Option<String>,
}

/// Input for updating a client. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateClient {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub gstin: Option<String>,
}
