use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single role assignment, e.g. `{"role": "SUPER_ADMIN"}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Role {
    pub role: String,
}

impl Role {
    pub fn new(role: impl Into<String>) -> Self {
        Self { role: role.into() }
    }
}

/// A user account belonging to a business.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub business_id: Option<String>,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// Payload for `auth/users/accounts/register`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserRegisterModel {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<Role>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}
