//! The session gateway: one object owning the HTTP client, the durable store
//! and the in-memory [`SessionContext`].
//!
//! Endpoint methods live in submodules grouped by backend area:
//!
//! - [`auth`] - login, logout, login-state checks and roles
//! - [`accounts`] - business accounts
//! - [`users`] - user accounts and credentials

pub mod accounts;
pub mod auth;
pub mod users;

use crate::alerts::{self, AlertPresenter};
use crate::config::{GatewaySettings, StorageKeys};
use crate::connection::Connection;
use crate::errors::{GatewayError, GatewayResult, StorageError};
use crate::model::{ApiResponse, ErrorItem};
use crate::session::SessionContext;
use crate::storage::KeyValueStore;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Header carrying the session token on authenticated calls.
pub const ACCESS_TOKEN_HEADER: &str = "access-token";

/// Typed access to the chat server administration API.
///
/// Cheap to share behind an `Arc`: all mutable state sits behind an async
/// lock and every method takes `&self`.
///
/// # Examples
///
/// ```no_run
/// use client::alerts::LogAlertPresenter;
/// use client::config::GatewaySettings;
/// use client::connection::Connection;
/// use client::gateway::SessionGateway;
/// use client::storage::FileStore;
/// use std::sync::Arc;
///
/// # async fn run() -> Result<(), client::errors::GatewayError> {
/// let gateway = SessionGateway::new(
///     &GatewaySettings::default(),
///     Arc::new(FileStore::in_default_location()?),
///     Arc::new(LogAlertPresenter),
/// )?;
///
/// gateway
///     .configure_connection(Some(Connection::new("https://chat.example.com")))
///     .await?;
///
/// let response = gateway.login("admin", "secret").await?;
/// if let Some(session) = response.into_data() {
///     gateway.adopt_session(session).await?;
/// }
/// # Ok(())
/// # }
/// ```
pub struct SessionGateway {
    http_client: reqwest::Client,
    store: Arc<dyn KeyValueStore>,
    keys: StorageKeys,
    presenter: Arc<dyn AlertPresenter>,
    context: RwLock<SessionContext>,
}

impl SessionGateway {
    /// Creates a gateway and restores the stored connection.
    ///
    /// The session is not restored; call
    /// [`session_status`](Self::session_status) for that.
    pub fn new(
        settings: &GatewaySettings,
        store: Arc<dyn KeyValueStore>,
        presenter: Arc<dyn AlertPresenter>,
    ) -> GatewayResult<Self> {
        let mut builder = reqwest::Client::builder().user_agent(settings.user_agent());
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| GatewayError::ClientCreation {
                reason: e.to_string(),
            })?;

        Self::with_client(http_client, settings.storage_keys().clone(), store, presenter)
    }

    /// Creates a gateway around an existing HTTP client.
    pub fn with_client(
        http_client: reqwest::Client,
        keys: StorageKeys,
        store: Arc<dyn KeyValueStore>,
        presenter: Arc<dyn AlertPresenter>,
    ) -> GatewayResult<Self> {
        let context = SessionContext::load(store.as_ref(), &keys)?;

        Ok(Self {
            http_client,
            store,
            keys,
            presenter,
            context: RwLock::new(context),
        })
    }

    /// Replaces the server connection.
    ///
    /// The URL is normalized to end with a single `/`. Memory is updated
    /// whatever the descriptor holds, and the descriptor is persisted as
    /// given (`None` is written as `null`).
    pub async fn configure_connection(&self, connection: Option<Connection>) -> GatewayResult<()> {
        let connection = connection.map(Connection::normalized);
        let serialized =
            serde_json::to_string(&connection).map_err(|e| StorageError::Serialize {
                key: self.keys.connection().to_string(),
                reason: e.to_string(),
            })?;

        match connection.as_ref().and_then(Connection::base_url) {
            Some(url) => log::info!("Server connection set to {url}"),
            None => log::info!("Server connection cleared"),
        }

        self.context.write().await.set_connection(connection);
        self.store.set(self.keys.connection(), &serialized)?;
        Ok(())
    }

    /// The configured connection, if any.
    pub async fn connection(&self) -> Option<Connection> {
        self.context.read().await.connection().cloned()
    }

    /// Normalized base URL of the configured connection.
    pub async fn base_url(&self) -> Option<String> {
        self.context.read().await.base_url().map(str::to_string)
    }

    /// Headers for an authenticated call.
    ///
    /// Contains `access-token` only while a session with a non-empty token
    /// is current; otherwise empty.
    pub async fn build_headers(&self) -> HeaderMap {
        let context = self.context.read().await;
        match context.access_token() {
            Some(token) => token_headers(token).unwrap_or_else(|e| {
                log::warn!("Current session token is not a valid header value: {e}");
                HeaderMap::new()
            }),
            None => HeaderMap::new(),
        }
    }

    /// Shows `error` through the alert presenter, see [`alerts::report_error`].
    pub fn report_error(&self, error: &GatewayError, title: &str, fallback: &str) {
        alerts::report_error(self.presenter.as_ref(), error, title, fallback);
    }

    /// Shows a structured server error, see [`alerts::report_typed_error`].
    pub fn report_typed_error(&self, item: &ErrorItem, title: &str, fallback: &str) {
        alerts::report_typed_error(self.presenter.as_ref(), item, title, fallback);
    }

    pub fn storage_keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// Full URL for an endpoint path relative to the base URL.
    pub(crate) async fn endpoint(&self, path: &str) -> GatewayResult<String> {
        let context = self.context.read().await;
        let base = context.base_url().ok_or(GatewayError::NotConfigured)?;
        Ok(format!("{base}{path}"))
    }

    /// Request to `path` carrying the current session headers.
    pub(crate) async fn authorized(
        &self,
        method: Method,
        path: &str,
    ) -> GatewayResult<(RequestBuilder, String)> {
        let url = self.endpoint(path).await?;
        let headers = self.build_headers().await;
        let request = self.http_client.request(method, &url).headers(headers);
        Ok((request, url))
    }

    /// Request to `path` without any session headers.
    pub(crate) async fn anonymous(
        &self,
        method: Method,
        path: &str,
    ) -> GatewayResult<(RequestBuilder, String)> {
        let url = self.endpoint(path).await?;
        Ok((self.http_client.request(method, &url), url))
    }

    /// Sends `request` and decodes the response envelope.
    ///
    /// Success and failure envelopes are both returned as `Ok`; non-2xx
    /// statuses become [`GatewayError::Status`] with the raw body kept.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &str,
    ) -> GatewayResult<ApiResponse<T>> {
        log::debug!("Requesting {url}");

        let response = request.send().await.map_err(|e| GatewayError::Transport {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| GatewayError::Transport {
            url: url.to_string(),
            reason: format!("Failed to read response: {e}"),
        })?;

        if !status.is_success() {
            log::debug!("{url} answered HTTP {status}");
            return Err(GatewayError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| GatewayError::Decode {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }

    pub(crate) fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub(crate) fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }

    pub(crate) fn context(&self) -> &RwLock<SessionContext> {
        &self.context
    }
}

/// Header map carrying `token` as the access token.
pub(crate) fn token_headers(token: &str) -> GatewayResult<HeaderMap> {
    let value = HeaderValue::from_str(token)
        .map_err(|e| GatewayError::InvalidSession(format!("access token unusable: {e}")))?;
    let mut headers = HeaderMap::new();
    headers.insert(HeaderName::from_static(ACCESS_TOKEN_HEADER), value);
    Ok(headers)
}
