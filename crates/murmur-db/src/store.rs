//! Storage gateway seams used by the service layer.
//!
//! Services hold these as trait objects so they can be wired against any
//! backing store; [`crate::Database`] is the production implementation.

use anyhow::Result;
use murmur_types::api::NewMessage;
use murmur_types::models::{Account, Message};

pub trait AccountStore: Send + Sync {
    fn account_by_id(&self, account_id: i64) -> Result<Option<Account>>;

    fn account_exists(&self, account_id: i64) -> Result<bool>;

    fn username_exists(&self, username: &str) -> Result<bool>;

    /// Exact match on both fields.
    fn account_by_credentials(&self, username: &str, password: &str) -> Result<Option<Account>>;

    /// Inserts a new account and returns it with its assigned id.
    /// Fails with [`crate::UniqueViolation`] if the username is taken.
    fn insert_account(&self, username: &str, password: &str) -> Result<Account>;
}

pub trait MessageStore: Send + Sync {
    fn message_by_id(&self, message_id: i64) -> Result<Option<Message>>;

    fn message_exists(&self, message_id: i64) -> Result<bool>;

    fn all_messages(&self) -> Result<Vec<Message>>;

    fn messages_by_poster(&self, account_id: i64) -> Result<Vec<Message>>;

    /// `posted_by` must already be resolved by the caller.
    fn insert_message(&self, posted_by: i64, message: &NewMessage) -> Result<Message>;

    /// Overwrites every column of the row with `message.message_id`.
    /// Returns the number of rows touched.
    fn replace_message(&self, message: &Message) -> Result<usize>;

    /// Returns the number of rows deleted.
    fn delete_message(&self, message_id: i64) -> Result<usize>;
}
