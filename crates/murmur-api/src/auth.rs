use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use murmur_types::api::AccountRequest;
use murmur_types::models::Account;

use crate::blocking;
use crate::error::ApiError;
use crate::service::{AccountService, MessageService};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub accounts: AccountService,
    pub messages: MessageService,
}

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<AccountRequest>, JsonRejection>,
) -> Result<Json<Account>, ApiError> {
    let Json(req) = payload?;
    let account = blocking(move || state.accounts.create_account(&req)).await?;
    Ok(Json(account))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<AccountRequest>, JsonRejection>,
) -> Result<Json<Account>, ApiError> {
    let Json(req) = payload?;
    let account = blocking(move || state.accounts.login_account(&req)).await?;
    Ok(Json(account))
}
