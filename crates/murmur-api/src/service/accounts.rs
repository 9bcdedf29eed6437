use std::sync::Arc;

use tracing::{debug, info};

use murmur_db::{AccountStore, UniqueViolation};
use murmur_types::api::AccountRequest;
use murmur_types::models::Account;

use crate::error::ApiError;
use crate::service::messages::text_len;

pub const MIN_PASSWORD_LEN: usize = 4;

const USERNAME_TAKEN: &str = "Username already taken.";

pub struct AccountService {
    store: Arc<dyn AccountStore>,
}

impl AccountService {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// Registers a new account.
    ///
    /// Uniqueness is checked before blankness so a taken empty username
    /// reports a conflict. The `UNIQUE` column still backs the pre-check when
    /// two registrations race.
    pub fn create_account(&self, candidate: &AccountRequest) -> Result<Account, ApiError> {
        if self.store.username_exists(&candidate.username)? {
            debug!("Registration rejected: username {:?} taken", candidate.username);
            return Err(ApiError::DuplicateUsername(USERNAME_TAKEN.into()));
        }
        if candidate.username.is_empty() {
            return Err(ApiError::InvalidInput("Username cannot be blank.".into()));
        }
        if text_len(&candidate.password) < MIN_PASSWORD_LEN {
            return Err(ApiError::InvalidInput(format!(
                "Password must be at least {} characters.",
                MIN_PASSWORD_LEN
            )));
        }

        let account = self
            .store
            .insert_account(&candidate.username, &candidate.password)
            .map_err(|e| {
                if e.downcast_ref::<UniqueViolation>().is_some() {
                    ApiError::DuplicateUsername(USERNAME_TAKEN.into())
                } else {
                    ApiError::Storage(e)
                }
            })?;

        info!("Registered account {} ({})", account.account_id, account.username);
        Ok(account)
    }

    /// Wrong username and wrong password fail the same way.
    pub fn login_account(&self, credentials: &AccountRequest) -> Result<Account, ApiError> {
        self.store
            .account_by_credentials(&credentials.username, &credentials.password)?
            .ok_or_else(|| {
                debug!("Login rejected for {:?}", credentials.username);
                ApiError::InvalidLogin(
                    "Username and password provided do not match an existing account.".into(),
                )
            })
    }
}
