//! User Model
//!
//! One record serves both the signed-in session and account administration;
//! `role` tells the two audiences apart.

use serde::{Deserialize, Serialize};

/// Account record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub user_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    pub status: bool,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.eq_ignore_ascii_case(ROLE_ADMIN)
    }
}

pub const ROLE_ADMIN: &str = "Admin";
pub const ROLE_USER: &str = "User";

/// Roles offered by the account form (value, label)
pub const USER_ROLES: [(&str, &str); 2] = [(ROLE_ADMIN, "Administrateur"), (ROLE_USER, "Utilisateur")];

pub const COUNTRIES: [&str; 17] = [
    "France",
    "Belgique",
    "Suisse",
    "Canada",
    "Maroc",
    "Tunisie",
    "Algérie",
    "Sénégal",
    "Côte d'Ivoire",
    "Cameroun",
    "Ghana",
    "RDC",
    "Nigeria",
    "Mali",
    "Burkina Faso",
    "Niger",
    "Tchad",
];

/// Create user payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreate {
    pub name: String,
    pub user_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub email: String,
    pub password: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub status: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

/// Update user payload (password changes go through [`ChangePassword`])
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub name: String,
    pub user_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub email: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub status: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

/// Change password payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePassword {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// List filters, sent as query parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
}

impl Default for UserFilters {
    fn default() -> Self {
        Self {
            page: Some(1),
            page_size: Some(10),
            search: None,
            role: None,
            status: None,
        }
    }
}

/// Paged user listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserList {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub total_count: u64,
}

/// Result of a single-user operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserOperation {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

/// Availability probe answer
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ExistsResponse {
    pub exists: bool,
}
