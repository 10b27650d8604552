use super::Session;
use crate::config::StorageKeys;
use crate::connection::Connection;
use crate::errors::StorageError;
use crate::storage::KeyValueStore;

/// In-memory connection and session the gateway issues requests with.
///
/// The connection is restored by [`SessionContext::load`]. The session is
/// never restored here: it only becomes current through an explicit check
/// or adoption, and [`SessionContext::teardown`] drops it again.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    connection: Option<Connection>,
    session: Option<Session>,
}

/// What the session key of the durable store currently holds.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredSession {
    Absent,
    Malformed,
    Present(Session),
}

impl SessionContext {
    pub fn new(connection: Option<Connection>) -> Self {
        Self {
            connection,
            session: None,
        }
    }

    /// Restores the connection descriptor from durable storage.
    ///
    /// An unreadable record is treated as "not configured" and logged.
    pub fn load(store: &dyn KeyValueStore, keys: &StorageKeys) -> Result<Self, StorageError> {
        let connection = match store.get(keys.connection())? {
            Some(raw) => match serde_json::from_str::<Option<Connection>>(&raw) {
                Ok(connection) => connection,
                Err(e) => {
                    log::warn!(
                        "Ignoring malformed connection record under '{}': {}",
                        keys.connection(),
                        e
                    );
                    None
                }
            },
            None => None,
        };

        if let Some(url) = connection.as_ref().and_then(Connection::base_url) {
            log::info!("Restored server connection: {url}");
        }

        Ok(Self::new(connection))
    }

    pub fn connection(&self) -> Option<&Connection> {
        self.connection.as_ref()
    }

    pub fn set_connection(&mut self, connection: Option<Connection>) {
        self.connection = connection;
    }

    /// Base URL of the configured connection, always ending with `/`.
    pub fn base_url(&self) -> Option<&str> {
        self.connection.as_ref().and_then(Connection::base_url)
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Token of the current session, if there is a usable one.
    pub fn access_token(&self) -> Option<&str> {
        self.session
            .as_ref()
            .map(|s| s.access_token.as_str())
            .filter(|token| !token.is_empty())
    }

    /// Makes `session` current. Sessions without a token are refused so the
    /// in-memory session always carries one.
    pub fn adopt(&mut self, session: Session) -> bool {
        if !session.has_token() {
            return false;
        }
        self.session = Some(session);
        true
    }

    /// Drops the in-memory session.
    pub fn teardown(&mut self) {
        self.session = None;
    }
}

/// Reads the session record stored under `key`.
pub fn read_stored_session(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<StoredSession, StorageError> {
    let Some(raw) = store.get(key)? else {
        return Ok(StoredSession::Absent);
    };

    match serde_json::from_str::<Option<Session>>(&raw) {
        Ok(Some(session)) => Ok(StoredSession::Present(session)),
        Ok(None) => Ok(StoredSession::Absent),
        Err(e) => {
            log::warn!("Stored session under '{key}' is malformed: {e}");
            Ok(StoredSession::Malformed)
        }
    }
}
