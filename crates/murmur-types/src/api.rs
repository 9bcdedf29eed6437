use serde::{Deserialize, Serialize};

// -- Accounts --

/// Body of `POST /register` and `POST /login`.
///
/// Missing fields decode as empty strings so they fail validation with a
/// reason instead of being rejected by the JSON extractor. Any `accountId`
/// sent by the client is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

// -- Messages --

/// Body of `POST /messages`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    #[serde(default)]
    pub posted_by: Option<i64>,
    #[serde(default)]
    pub message_text: String,
    #[serde(default)]
    pub time_posted: i64,
}

/// Body of `PATCH /messages/{id}`.
///
/// `messageText` always replaces the stored text. `postedBy` and `timePosted`
/// overwrite the stored values only when present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageUpdate {
    #[serde(default)]
    pub message_text: String,
    #[serde(default)]
    pub posted_by: Option<i64>,
    #[serde(default)]
    pub time_posted: Option<i64>,
}
