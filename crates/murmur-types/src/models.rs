use serde::{Deserialize, Serialize};

/// A registered account as stored and returned over the API.
/// The password is kept as given; there is no hashing layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub account_id: i64,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub message_id: i64,
    pub posted_by: i64,
    pub message_text: String,
    /// Opaque client-supplied timestamp, passed through untouched.
    pub time_posted: i64,
}
