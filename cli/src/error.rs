use chatadmin_client::errors::{GatewayError, StorageError};
use std::fmt::Display;

/// Application-wide errors of the console.
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// A gateway call failed without a usable server answer.
    Gateway(String),
    /// The server answered but reported a failure; already shown to the user.
    Rejected(String),
    /// No usable session, the user has to log in.
    Auth(String),
    /// Configuration loading or validation failed.
    Config(String),
    /// Terminal or file I/O failed.
    Io(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Gateway(msg) => write!(f, "Gateway Error: {msg}"),
            AppError::Rejected(msg) => write!(f, "Request Rejected: {msg}"),
            AppError::Auth(msg) => write!(f, "Authentication Error: {msg}"),
            AppError::Config(msg) => write!(f, "Configuration Error: {msg}"),
            AppError::Io(msg) => write!(f, "I/O Error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::NotConfigured => AppError::Config(
                "no server connection configured, run `chatadmin connect <URL>` first".to_string(),
            ),
            GatewayError::InvalidSession(msg) => AppError::Auth(msg),
            other => AppError::Gateway(other.to_string()),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Io(format!("Failed to render output: {err}"))
    }
}

pub type AppResult<T> = Result<T, AppError>;
