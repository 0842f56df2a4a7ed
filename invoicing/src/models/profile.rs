//! Issuer profile model.

use serde::{Deserialize, Serialize};

/// The issuing business as it appears on rendered documents. Empty optional
/// fields are omitted from output entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssuerProfile {
    pub business_name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub gstin: Option<String>,
}
