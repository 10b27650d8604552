use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Uniform wrapper returned by every backend call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<ErrorItem>,
}

impl<T> ApiResponse<T> {
    /// Payload of a successful envelope, `None` when the call failed.
    pub fn into_data(self) -> Option<T> {
        if self.success { self.data } else { None }
    }
}

/// Structured server-side error, possibly carrying nested sub-errors.
///
/// `code` is kept as raw JSON: servers send it as a string or a number.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ErrorItem {
    #[serde(default)]
    pub code: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<ErrorItem>,
}

/// One page of a paginated collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListContent<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_failure_envelope_without_data() {
        let raw = r#"{
            "success": false,
            "error": {
                "code": "VALIDATION",
                "message": "Invalid input",
                "errors": [{"message": "name is required"}]
            }
        }"#;

        let envelope: ApiResponse<serde_json::Value> = serde_json::from_str(raw).unwrap();
        assert!(!envelope.success);
        assert!(envelope.data.is_none());

        let error = envelope.error.unwrap();
        assert_eq!(error.code, Some(Value::from("VALIDATION")));
        assert_eq!(error.errors.len(), 1);
        assert_eq!(error.errors[0].message.as_deref(), Some("name is required"));
    }

    #[test]
    fn numeric_error_code_still_decodes() {
        let raw = r#"{"success":false,"error":{"code":401,"message":"Bad credentials","errors":[]}}"#;

        let envelope: ApiResponse<serde_json::Value> = serde_json::from_str(raw).unwrap();
        let error = envelope.error.unwrap();
        assert_eq!(error.code, Some(Value::from(401)));
        assert_eq!(error.message.as_deref(), Some("Bad credentials"));
    }

    #[test]
    fn into_data_drops_payload_of_failed_call() {
        let envelope = ApiResponse {
            success: false,
            data: Some(7),
            error: None,
        };
        assert_eq!(envelope.into_data(), None);
    }

    #[test]
    fn list_content_tolerates_missing_counters() {
        let page: ListContent<String> =
            serde_json::from_str(r#"{"content": ["a", "b"]}"#).unwrap();
        assert_eq!(page.content, vec!["a", "b"]);
        assert_eq!(page.total_elements, 0);
    }
}
