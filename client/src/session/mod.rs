//! Logged-in session state.
//!
//! - [`Session`] is the authenticated user as returned by `auth/login`.
//! - [`SessionContext`] holds the connection and session the gateway works
//!   with, with an explicit load/teardown lifecycle.
//! - [`SessionStatus`] is the outcome of a login-state check.

pub mod context;
pub mod status;
pub mod types;

pub use context::{SessionContext, StoredSession, read_stored_session};
pub use status::{InvalidReason, SessionStatus};
pub use types::{BUSINESS_ADMIN, SUPER_ADMIN, Session};
