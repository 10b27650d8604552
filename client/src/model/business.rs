use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Lifecycle state of a business account.
///
/// The status endpoint takes the symbolic name in the URL path, e.g.
/// `business/accounts/{id}/status/ACTIVE`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BusinessAccountStatus {
    Active,
    Inactive,
    Blocked,
}

impl BusinessAccountStatus {
    pub const ALL: [BusinessAccountStatus; 3] = [
        BusinessAccountStatus::Active,
        BusinessAccountStatus::Inactive,
        BusinessAccountStatus::Blocked,
    ];

    /// Symbolic name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessAccountStatus::Active => "ACTIVE",
            BusinessAccountStatus::Inactive => "INACTIVE",
            BusinessAccountStatus::Blocked => "BLOCKED",
        }
    }

    /// Case-insensitive lookup by symbolic name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for BusinessAccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A business account as exchanged with `business/accounts`.
///
/// `id` is absent for accounts that have not been created yet; its presence
/// is what makes a save an update instead of a create. Fields the client does
/// not model are kept in `details` and sent back untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BusinessAccount {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl BusinessAccount {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parsed lifecycle state; `None` when absent or not one the client knows.
    pub fn account_status(&self) -> Option<BusinessAccountStatus> {
        self.status.as_deref().and_then(BusinessAccountStatus::from_name)
    }

    /// The identifier, treating an empty string as "not created yet".
    pub fn existing_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_names_are_screaming_case() {
        assert_eq!(BusinessAccountStatus::Blocked.to_string(), "BLOCKED");
        assert_eq!(
            serde_json::to_string(&BusinessAccountStatus::Inactive).unwrap(),
            "\"INACTIVE\""
        );
    }

    #[test]
    fn status_lookup_ignores_case() {
        assert_eq!(
            BusinessAccountStatus::from_name("active"),
            Some(BusinessAccountStatus::Active)
        );
        assert_eq!(BusinessAccountStatus::from_name("archived"), None);
    }

    #[test]
    fn unknown_fields_survive_a_round_trip() {
        let raw = r#"{"id":"b1","name":"Acme","phone":"555","settings":{"bot":true}}"#;
        let account: BusinessAccount = serde_json::from_str(raw).unwrap();
        assert_eq!(account.existing_id(), Some("b1"));
        assert_eq!(account.details.get("phone"), Some(&Value::from("555")));
        assert_eq!(account.account_status(), None);

        let back = serde_json::to_value(&account).unwrap();
        assert_eq!(back["settings"]["bot"], Value::Bool(true));
    }

    #[test]
    fn unknown_status_does_not_break_decoding() {
        let account: BusinessAccount =
            serde_json::from_str(r#"{"id":"b2","name":"Beta","status":"ARCHIVED"}"#).unwrap();
        assert_eq!(account.status.as_deref(), Some("ARCHIVED"));
        assert_eq!(account.account_status(), None);

        let active: BusinessAccount =
            serde_json::from_str(r#"{"id":"b3","name":"Gamma","status":"ACTIVE"}"#).unwrap();
        assert_eq!(active.account_status(), Some(BusinessAccountStatus::Active));
    }

    #[test]
    fn empty_id_counts_as_new_account() {
        let account = BusinessAccount {
            id: Some(String::new()),
            ..BusinessAccount::new("Acme")
        };
        assert_eq!(account.existing_id(), None);
    }
}
