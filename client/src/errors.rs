use crate::model::ApiResponse;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the durable key/value storage backing the gateway.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to determine storage directory: {0}")]
    DirectoryUnavailable(String),

    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to remove {path}: {source}")]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("Failed to serialize value for key '{key}': {reason}")]
    Serialize { key: String, reason: String },

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// Errors returned by [`SessionGateway`](crate::gateway::SessionGateway) operations.
///
/// Application-level failures (an envelope with `success == false`) are NOT
/// errors: they come back as `Ok(ApiResponse)` and the caller decides what to
/// do. This enum only covers the cases where no usable envelope exists.
///
/// # Error Categories
///
/// - [`NotConfigured`] - no server connection has been configured yet
/// - [`Transport`] - the request never produced a response
/// - [`Status`] - the server answered with a non-success HTTP status
/// - [`Decode`] - a success response whose body is not the expected envelope
/// - [`Storage`] - durable storage failed
///
/// [`NotConfigured`]: GatewayError::NotConfigured
/// [`Transport`]: GatewayError::Transport
/// [`Status`]: GatewayError::Status
/// [`Decode`]: GatewayError::Decode
/// [`Storage`]: GatewayError::Storage
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("No server connection configured")]
    NotConfigured,

    #[error("HTTP client creation failed: {reason}")]
    ClientCreation { reason: String },

    #[error("Request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    /// The server answered with a non-2xx status. `body` is the raw response
    /// text, which usually still carries an error envelope.
    #[error("Request to {url} returned HTTP {status}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Failed to decode response from {url}: {reason}")]
    Decode { url: String, reason: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid session: {0}")]
    InvalidSession(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl GatewayError {
    /// Decodes the server-side error envelope carried by a [`GatewayError::Status`].
    ///
    /// Returns `None` for every other variant, or when the body is not an
    /// envelope.
    pub fn error_envelope(&self) -> Option<ApiResponse<serde_json::Value>> {
        match self {
            GatewayError::Status { body, .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }

    /// `true` when the request never reached the server or got no response.
    pub fn is_transport(&self) -> bool {
        matches!(self, GatewayError::Transport { .. })
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_exposes_envelope() {
        let err = GatewayError::Status {
            url: "http://x.test/auth/login".to_string(),
            status: 401,
            body: r#"{"success":false,"error":{"message":"Bad credentials","errors":[]}}"#
                .to_string(),
        };

        let envelope = err.error_envelope().expect("envelope should decode");
        assert!(!envelope.success);
        assert_eq!(
            envelope.error.and_then(|e| e.message).as_deref(),
            Some("Bad credentials")
        );
    }

    #[test]
    fn non_json_status_body_has_no_envelope() {
        let err = GatewayError::Status {
            url: "http://x.test/".to_string(),
            status: 502,
            body: "<html>Bad Gateway</html>".to_string(),
        };
        assert!(err.error_envelope().is_none());
    }

    #[test]
    fn transport_errors_carry_no_envelope() {
        let err = GatewayError::Transport {
            url: "http://x.test/".to_string(),
            reason: "connection refused".to_string(),
        };
        assert!(err.is_transport());
        assert!(err.error_envelope().is_none());
    }
}
