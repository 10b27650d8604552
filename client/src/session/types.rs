use crate::model::Role;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Role granting access to every business account.
pub const SUPER_ADMIN: &str = "SUPER_ADMIN";
/// Role granting administration of a single business account.
pub const BUSINESS_ADMIN: &str = "BUSINESS_ADMIN";

/// The authenticated user: access token plus assigned roles.
///
/// Any other field the server sends along (user id, username, business id)
/// is kept in `profile` and written back to storage as-is.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl Session {
    pub fn new(access_token: impl Into<String>, roles: Vec<Role>) -> Self {
        Self {
            access_token: access_token.into(),
            roles,
            profile: Map::new(),
        }
    }

    pub fn has_token(&self) -> bool {
        !self.access_token.is_empty()
    }

    /// Membership is computed from the role list on every call.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r.role == role)
    }

    pub fn is_super_admin(&self) -> bool {
        self.has_role(SUPER_ADMIN)
    }

    pub fn is_business_admin(&self) -> bool {
        self.has_role(BUSINESS_ADMIN)
    }

    /// Convenience accessor for a string field of the server profile.
    pub fn profile_str(&self, field: &str) -> Option<&str> {
        self.profile.get(field).and_then(Value::as_str)
    }
}

// Tokens end up in logs far too easily, keep them out of Debug output
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.has_token() { "<redacted>" } else { "<empty>" };
        f.debug_struct("Session")
            .field("access_token", &token)
            .field("roles", &self.roles)
            .field("profile", &self.profile)
            .finish()
    }
}
