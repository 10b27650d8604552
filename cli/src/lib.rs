//! # chatadmin
//!
//! Command-line console for a chat server's administration API, built on
//! the [`chatadmin_client`] session gateway.
//!
//! ## Modules
//!
//! - [`cli`] - command-line arguments
//! - [`commands`] - command execution against the gateway
//! - [`config`] - configuration loading and validation
//! - [`error`] - application error type
//! - [`logger`] - logging setup
//! - [`presenter`] - terminal alert presenter

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod presenter;

pub use error::{AppError, AppResult};
