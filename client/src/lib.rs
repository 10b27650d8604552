//! # chatadmin client
//!
//! Session gateway for the chat server administration REST API. It keeps
//! the server connection and the logged-in session, mirrors both to durable
//! storage, and exposes the backend endpoints as typed async calls.
//!
//! ## Modules
//!
//! - [`gateway`] - [`SessionGateway`] and its endpoint methods
//! - [`session`] - session data, context and login-state results
//! - [`connection`] - connection descriptor and base URL normalization
//! - [`storage`] - durable key/value storage backends
//! - [`model`] - response envelope and domain payloads
//! - [`alerts`] - formatting and presenting errors to the user
//! - [`config`] - gateway settings
//! - [`errors`] - error types

pub mod alerts;
pub mod config;
pub mod connection;
pub mod errors;
pub mod gateway;
pub mod model;
pub mod session;
pub mod storage;

pub use gateway::SessionGateway;
