use super::Session;
use std::fmt;

/// Outcome of a login-state check.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionStatus {
    /// No server connection is configured, nothing was checked.
    NotConfigured,
    /// There is no usable session; the reason says why.
    Invalid(InvalidReason),
    /// The session is usable and is now the gateway's current session.
    Valid(Session),
}

impl SessionStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, SessionStatus::Valid(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionStatus::Valid(session) => Some(session),
            _ => None,
        }
    }
}

/// Why a stored session could not be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// Nothing is stored under the session key.
    NoStoredSession,
    /// The stored record is not a session.
    MalformedRecord,
    /// The server answered `auth/me` with a failure envelope.
    Rejected,
    /// `auth/me` could not be completed (network or HTTP failure).
    Unreachable,
    /// The server accepted the check but no token is available to adopt.
    MissingToken,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            InvalidReason::NoStoredSession => "no stored session",
            InvalidReason::MalformedRecord => "stored session record is malformed",
            InvalidReason::Rejected => "session rejected by server",
            InvalidReason::Unreachable => "server could not be reached",
            InvalidReason::MissingToken => "session has no access token",
        };
        f.write_str(text)
    }
}
