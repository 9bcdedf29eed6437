//! Business rules between the HTTP handlers and the storage gateway.
//!
//! Each operation validates synchronously before any write, so a rejected
//! request never leaves a partial mutation behind.

pub mod accounts;
pub mod messages;

pub use accounts::AccountService;
pub use messages::MessageService;
