use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Durable storage key for the connection descriptor.
pub const DEFAULT_CONNECTION_KEY: &str = "conn";
/// Durable storage key for the session record, used for reads, writes and
/// removal alike.
pub const DEFAULT_SESSION_KEY: &str = "user";

/// Storage keys the gateway reads and writes.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct StorageKeys {
    connection: Option<String>,
    session: Option<String>,
}

impl StorageKeys {
    pub fn new(connection: impl Into<String>, session: impl Into<String>) -> Self {
        Self {
            connection: Some(connection.into()),
            session: Some(session.into()),
        }
    }

    pub fn connection(&self) -> &str {
        self.connection.as_deref().unwrap_or(DEFAULT_CONNECTION_KEY)
    }

    pub fn session(&self) -> &str {
        self.session.as_deref().unwrap_or(DEFAULT_SESSION_KEY)
    }
}

/// Gateway settings, usually read from the `[gateway]` table of the
/// application config.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct GatewaySettings {
    #[serde(default)]
    storage_keys: StorageKeys,
    storage_dir: Option<PathBuf>,
    request_timeout_secs: Option<u64>,
    user_agent: Option<String>,
}

impl GatewaySettings {
    pub fn storage_keys(&self) -> &StorageKeys {
        &self.storage_keys
    }

    /// Explicit storage directory; `None` means the platform default.
    pub fn storage_dir(&self) -> Option<&PathBuf> {
        self.storage_dir.as_ref()
    }

    /// Per-request timeout. `None` leaves the transport default in place.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    pub fn user_agent(&self) -> &str {
        self.user_agent
            .as_deref()
            .unwrap_or(concat!("chatadmin/", env!("CARGO_PKG_VERSION")))
    }

    pub fn with_storage_keys(mut self, keys: StorageKeys) -> Self {
        self.storage_keys = keys;
        self
    }

    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = Some(dir.into());
        self
    }

    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs);
        self
    }
}
