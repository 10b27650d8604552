use serde::{Deserialize, Serialize};

/// Descriptor naming the backend the gateway talks to.
///
/// Serialized as `{"ServerUrl": "..."}` so records written by earlier
/// console builds keep loading.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Connection {
    #[serde(rename = "ServerUrl", default)]
    pub server_url: String,
}

impl Connection {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
        }
    }

    /// Returns a copy whose URL is normalized, or unchanged when empty.
    pub fn normalized(mut self) -> Self {
        if !self.server_url.is_empty() {
            self.server_url = normalize_base_url(&self.server_url);
        }
        self
    }

    /// The base URL to prefix endpoint paths with, if one is set.
    pub fn base_url(&self) -> Option<&str> {
        Some(self.server_url.as_str()).filter(|url| !url.is_empty())
    }
}

/// Strips a single trailing `\` and makes sure the URL ends with `/`.
pub fn normalize_base_url(base_url: &str) -> String {
    let trimmed = base_url.strip_suffix('\\').unwrap_or(base_url);
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_backslash_becomes_slash() {
        assert_eq!(normalize_base_url("http://x.test\\"), "http://x.test/");
    }

    #[test]
    fn slash_is_appended_once() {
        assert_eq!(normalize_base_url("http://x.test"), "http://x.test/");
        assert_eq!(normalize_base_url("http://x.test/"), "http://x.test/");
        assert_eq!(normalize_base_url("http://x.test/api"), "http://x.test/api/");
    }

    #[test]
    fn only_one_backslash_is_stripped() {
        assert_eq!(normalize_base_url("http://x.test\\\\"), "http://x.test\\/");
    }

    #[test]
    fn empty_connection_is_left_alone() {
        let conn = Connection::default().normalized();
        assert_eq!(conn.server_url, "");
        assert_eq!(conn.base_url(), None);
    }

    #[test]
    fn serializes_with_legacy_field_name() {
        let json = serde_json::to_string(&Connection::new("http://x.test/")).unwrap();
        assert_eq!(json, r#"{"ServerUrl":"http://x.test/"}"#);
    }
}
