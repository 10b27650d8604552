use super::{SessionGateway, token_headers};
use crate::errors::{GatewayError, GatewayResult, StorageError};
use crate::model::{ApiResponse, Role};
use crate::session::{InvalidReason, Session, SessionStatus, StoredSession, read_stored_session};
use reqwest::Method;
use serde::Serialize;
use tokio::task::JoinHandle;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

impl SessionGateway {
    /// Posts credentials to `auth/login`.
    ///
    /// Sent without an access token. The returned session is neither stored
    /// nor made current; pass it to [`adopt_session`](Self::adopt_session)
    /// once the envelope reports success.
    pub async fn login(&self, username: &str, password: &str) -> GatewayResult<ApiResponse<Session>> {
        let (request, url) = self.anonymous(Method::POST, "auth/login").await?;
        log::info!("Logging in as '{username}'");
        self.execute(request.json(&LoginRequest { username, password }), &url)
            .await
    }

    /// Persists `session` under the session key and makes it current.
    pub async fn adopt_session(&self, session: Session) -> GatewayResult<()> {
        if !session.has_token() {
            return Err(GatewayError::InvalidSession(
                "session carries no access token".to_string(),
            ));
        }

        self.persist_session(&session)?;
        self.context().write().await.adopt(session);

        log::info!("Session adopted");
        Ok(())
    }

    /// Asks `auth/me` whether `candidate` is still valid.
    ///
    /// Uses the candidate's own token, not the current session's.
    pub async fn check_login(&self, candidate: &Session) -> GatewayResult<ApiResponse<Session>> {
        let (request, url) = self.anonymous(Method::GET, "auth/me").await?;
        let headers = token_headers(&candidate.access_token)?;
        self.execute(request.headers(headers), &url).await
    }

    /// Determines whether a usable session exists.
    ///
    /// Without a connection nothing is checked. Otherwise the stored session
    /// record is read: a record with a token is accepted as-is unless
    /// `force_revalidate` is set, in which case (and for tokenless records)
    /// `auth/me` decides. A valid session becomes the current one, and one
    /// completed from the server's answer is stored as well.
    ///
    /// A session the server refuses is dropped from memory. The stored record
    /// stays in place either way so a later check can succeed without logging
    /// in again; use [`logout`](Self::logout) to forget it.
    pub async fn session_status(&self, force_revalidate: bool) -> GatewayResult<SessionStatus> {
        if self.context().read().await.base_url().is_none() {
            log::debug!("Session check skipped: no connection configured");
            return Ok(SessionStatus::NotConfigured);
        }

        let stored = match read_stored_session(self.store(), self.keys.session())? {
            StoredSession::Absent => {
                return Ok(SessionStatus::Invalid(InvalidReason::NoStoredSession));
            }
            StoredSession::Malformed => {
                return Ok(SessionStatus::Invalid(InvalidReason::MalformedRecord));
            }
            StoredSession::Present(session) => session,
        };

        if stored.has_token() && !force_revalidate {
            self.context().write().await.adopt(stored.clone());
            log::debug!("Stored session accepted without revalidation");
            return Ok(SessionStatus::Valid(stored));
        }

        let status = match self.check_login(&stored).await {
            Ok(response) if response.success => {
                // A tokenless record can still be completed from the server's answer
                let session = if stored.has_token() {
                    Some(stored)
                } else {
                    match response.data.filter(Session::has_token) {
                        Some(session) => {
                            self.persist_session(&session)?;
                            Some(session)
                        }
                        None => None,
                    }
                };

                match session {
                    Some(session) => {
                        self.context().write().await.adopt(session.clone());
                        SessionStatus::Valid(session)
                    }
                    None => SessionStatus::Invalid(InvalidReason::MissingToken),
                }
            }
            Ok(_) => self.reject_current_session().await,
            Err(GatewayError::Status { status, .. }) => {
                log::info!("Session revalidation refused with HTTP {status}");
                self.reject_current_session().await
            }
            Err(GatewayError::InvalidSession(reason)) => {
                log::warn!("Stored session cannot be sent: {reason}");
                self.reject_current_session().await
            }
            Err(e) => {
                log::warn!("Session revalidation failed: {e}");
                SessionStatus::Invalid(InvalidReason::Unreachable)
            }
        };

        log::info!(
            "Session revalidated: {}",
            if status.is_valid() { "valid" } else { "invalid" }
        );
        Ok(status)
    }

    /// Boolean form of [`session_status`](Self::session_status).
    ///
    /// Storage failures count as "not logged in".
    pub async fn is_session_active(&self, force_revalidate: bool) -> bool {
        match self.session_status(force_revalidate).await {
            Ok(status) => status.is_valid(),
            Err(e) => {
                log::error!("Session check failed: {e}");
                false
            }
        }
    }

    /// Forgets the session and notifies the server.
    ///
    /// The in-memory session and the stored record are removed first. The
    /// `auth/logout` call then runs in the background with the now-empty
    /// headers; its outcome is only logged. The returned handle lets callers
    /// wait for it, e.g. before the process exits. `None` means no
    /// connection was configured and nothing was sent.
    pub async fn logout(&self) -> GatewayResult<Option<JoinHandle<()>>> {
        // Memory goes first so a storage failure cannot leave the token in use
        self.context().write().await.teardown();
        self.store().remove(self.keys.session())?;
        log::info!("Logged out");

        let url = match self.endpoint("auth/logout").await {
            Ok(url) => url,
            Err(GatewayError::NotConfigured) => return Ok(None),
            Err(e) => return Err(e),
        };
        let request = self
            .http_client()
            .get(&url)
            .headers(self.build_headers().await);

        Ok(Some(tokio::spawn(async move {
            match request.send().await {
                Ok(response) => log::debug!("Logout answered HTTP {}", response.status()),
                Err(e) => log::debug!("Logout call to {url} failed: {e}"),
            }
        })))
    }

    /// Writes `session` under the session key.
    fn persist_session(&self, session: &Session) -> GatewayResult<()> {
        let serialized = serde_json::to_string(session).map_err(|e| StorageError::Serialize {
            key: self.keys.session().to_string(),
            reason: e.to_string(),
        })?;
        self.store().set(self.keys.session(), &serialized)?;
        Ok(())
    }

    /// Drops the in-memory session after the server refused it. The stored
    /// record stays for a later retry.
    async fn reject_current_session(&self) -> SessionStatus {
        self.context().write().await.teardown();
        SessionStatus::Invalid(InvalidReason::Rejected)
    }

    /// The current in-memory session.
    pub async fn current_session(&self) -> Option<Session> {
        self.context().read().await.session().cloned()
    }

    pub async fn is_super_admin(&self) -> bool {
        self.context()
            .read()
            .await
            .session()
            .is_some_and(Session::is_super_admin)
    }

    pub async fn is_business_admin(&self) -> bool {
        self.context()
            .read()
            .await
            .session()
            .is_some_and(Session::is_business_admin)
    }

    /// `GET auth/roles`
    pub async fn list_roles(&self) -> GatewayResult<ApiResponse<Vec<Role>>> {
        let (request, url) = self.authorized(Method::GET, "auth/roles").await?;
        self.execute(request, &url).await
    }
}
