use std::sync::Arc;

use tracing::{debug, info};

use murmur_db::{AccountStore, MessageStore};
use murmur_types::api::{MessageUpdate, NewMessage};
use murmur_types::models::Message;

use crate::error::ApiError;

/// Upper bound on message text, in UTF-16 code units.
pub const MAX_MESSAGE_LEN: usize = 255;

pub struct MessageService {
    messages: Arc<dyn MessageStore>,
    accounts: Arc<dyn AccountStore>,
}

impl MessageService {
    pub fn new(messages: Arc<dyn MessageStore>, accounts: Arc<dyn AccountStore>) -> Self {
        Self { messages, accounts }
    }

    /// Text is validated before the poster is resolved.
    pub fn create_message(&self, candidate: &NewMessage) -> Result<Message, ApiError> {
        validate_text(&candidate.message_text)?;

        let posted_by = match candidate.posted_by {
            Some(id) if self.accounts.account_exists(id)? => id,
            other => {
                debug!("Message rejected: unknown poster {:?}", other);
                return Err(ApiError::InvalidInput(
                    "Message posted_by does not match existing account ID.".into(),
                ));
            }
        };

        let message = self.messages.insert_message(posted_by, candidate)?;
        info!("Account {} posted message {}", posted_by, message.message_id);
        Ok(message)
    }

    pub fn get_all_messages(&self) -> Result<Vec<Message>, ApiError> {
        Ok(self.messages.all_messages()?)
    }

    pub fn get_message_by_id(&self, message_id: i64) -> Result<Option<Message>, ApiError> {
        Ok(self.messages.message_by_id(message_id)?)
    }

    /// `Some(1)` when a row was removed, `None` when there was nothing to delete.
    pub fn delete_message_by_id(&self, message_id: i64) -> Result<Option<usize>, ApiError> {
        let deleted = self.messages.delete_message(message_id)?;
        if deleted == 0 {
            return Ok(None);
        }

        info!("Deleted message {}", message_id);
        Ok(Some(deleted))
    }

    /// Replaces the stored text and, when supplied, the poster and timestamp.
    /// The poster is not re-validated here.
    pub fn update_message_by_id(
        &self,
        message_id: i64,
        update: &MessageUpdate,
    ) -> Result<usize, ApiError> {
        let Some(existing) = self.messages.message_by_id(message_id)? else {
            return Err(unknown_message());
        };
        validate_text(&update.message_text)?;

        let merged = Message {
            message_id,
            posted_by: update.posted_by.unwrap_or(existing.posted_by),
            message_text: update.message_text.clone(),
            time_posted: update.time_posted.unwrap_or(existing.time_posted),
        };
        let updated = self.messages.replace_message(&merged)?;
        if updated == 0 {
            // deleted between the lookup and the write
            return Err(unknown_message());
        }

        info!("Updated message {}", message_id);
        Ok(updated)
    }

    pub fn get_messages_by_account_id(&self, account_id: i64) -> Result<Vec<Message>, ApiError> {
        Ok(self.messages.messages_by_poster(account_id)?)
    }
}

fn unknown_message() -> ApiError {
    ApiError::InvalidInput("Message id does not exist.".into())
}

/// Length in UTF-16 code units, so characters outside the BMP count twice.
pub(crate) fn text_len(text: &str) -> usize {
    text.encode_utf16().count()
}

fn validate_text(text: &str) -> Result<(), ApiError> {
    let len = text_len(text);
    if len == 0 {
        return Err(ApiError::InvalidInput("Message text cannot be blank.".into()));
    }
    if len > MAX_MESSAGE_LEN {
        return Err(ApiError::InvalidInput(format!(
            "Message text cannot exceed {} characters.",
            MAX_MESSAGE_LEN
        )));
    }
    Ok(())
}
