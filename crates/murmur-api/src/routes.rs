use axum::{
    Router,
    routing::{get, post},
};

use crate::auth::{self, AppState};
use crate::messages;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route(
            "/messages",
            get(messages::get_all_messages).post(messages::create_message),
        )
        .route(
            "/messages/{message_id}",
            get(messages::get_message_by_id)
                .delete(messages::delete_message_by_id)
                .patch(messages::update_message_by_id),
        )
        .route(
            "/accounts/{account_id}/messages",
            get(messages::get_messages_by_account_id),
        )
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
