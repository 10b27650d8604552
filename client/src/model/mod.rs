//! Wire types exchanged with the chat server administration API.
//!
//! Every endpoint answers with an [`ApiResponse`] envelope. Its shape is an
//! assumed contract with the server: decoding fails only when the JSON does
//! not fit at all, no further validation is performed.

pub mod business;
pub mod envelope;
pub mod users;

pub use business::{BusinessAccount, BusinessAccountStatus};
pub use envelope::{ApiResponse, ErrorItem, ListContent};
pub use users::{Role, User, UserRegisterModel};
