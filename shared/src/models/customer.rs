//! Customer Model

use serde::{Deserialize, Serialize};

use super::measure::Measure;

/// Customer list row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummary {
    pub id: i64,
    pub name: String,
    pub phone_number: String,
    pub photo_url: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub has_measures: bool,
}

/// Customer detail, with its measurements when recorded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub phone_number: String,
    pub photo_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub measure: Option<Measure>,
}

/// Create customer payload (sent as multipart, photo attached separately)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerCreate {
    pub name: String,
    pub phone_number: String,
}

/// Update customer payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub phone_number: Option<String>,
}
