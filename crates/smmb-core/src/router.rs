//! Chat text → SMM API dispatch.
//!
//! Per message the router decides between key registration, a status query and
//! an order action, and always produces a reply. Errors never escape: every
//! failure becomes a distinct user-facing text plus a tracing event.

use std::sync::Arc;

use crate::{
    domain::{OrderId, UserId},
    formatting::{
        format_action_done, format_error_reply, format_order_status, help_text, ASK_FOR_KEY,
        INVALID_COMMAND, INVALID_FORMAT, KEY_ALREADY_SAVED, KEY_SAVED, NOT_YOUR_ORDER,
        STORE_UNAVAILABLE,
    },
    logging::mask_key,
    smm::{Action, ActionRequest, ActionResponse, OrderStatus, SmmApi},
    store::{Registration, UserStore},
};

/// Shape of a message from a user who already has a key on file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    /// `123456`
    StatusQuery(OrderId),
    /// `123456 cancel`; `word` is the lower-cased token the user typed.
    Action {
        order: OrderId,
        action: Action,
        word: String,
    },
    /// `123456 bogus`
    UnknownCommand { order: OrderId, word: String },
    Malformed,
}

/// Classify a message. Tokens after the command word are ignored.
pub fn parse_input(text: &str) -> Input {
    let lowered = text.to_lowercase();
    let parts: Vec<&str> = lowered.split_whitespace().collect();

    match parts.as_slice() {
        [single] => OrderId::parse(single)
            .map(Input::StatusQuery)
            .unwrap_or(Input::Malformed),
        [first, word, ..] => {
            let Some(order) = OrderId::parse(first) else {
                return Input::Malformed;
            };
            match Action::from_command(word) {
                Some(action) => Input::Action {
                    order,
                    action,
                    word: word.to_string(),
                },
                None => Input::UnknownCommand {
                    order,
                    word: word.to_string(),
                },
            }
        }
        [] => Input::Malformed,
    }
}

pub struct CommandRouter {
    store: Arc<dyn UserStore>,
    api: Arc<dyn SmmApi>,
}

impl CommandRouter {
    pub fn new(store: Arc<dyn UserStore>, api: Arc<dyn SmmApi>) -> Self {
        Self { store, api }
    }

    /// `/start`: tell the user whether a key is already on file.
    pub async fn handle_start(&self, user: UserId) -> String {
        match self.store.api_key(user).await {
            Ok(Some(_)) => KEY_ALREADY_SAVED.to_string(),
            Ok(None) => ASK_FOR_KEY.to_string(),
            Err(e) => {
                tracing::error!(user = %user, error = %e, "user store lookup failed");
                STORE_UNAVAILABLE.to_string()
            }
        }
    }

    pub fn handle_help(&self) -> String {
        help_text()
    }

    /// Handle one text message. Returns `None` when there is nothing to answer.
    pub async fn handle_text(&self, user: UserId, text: &str) -> Option<String> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let api_key = match self.store.api_key(user).await {
            Ok(key) => key,
            Err(e) => {
                tracing::error!(user = %user, error = %e, "user store lookup failed");
                return Some(STORE_UNAVAILABLE.to_string());
            }
        };

        let reply = match api_key {
            None => self.register(user, text).await,
            Some(api_key) => self.dispatch(user, api_key, parse_input(text)).await,
        };
        Some(reply)
    }

    async fn register(&self, user: UserId, api_key: &str) -> String {
        match self.store.register(user, api_key).await {
            Ok(Registration::Saved) => {
                tracing::info!(user = %user, key = %mask_key(api_key), "api key saved");
                KEY_SAVED.to_string()
            }
            // Another message from the same user won the race.
            Ok(Registration::AlreadyPresent) => KEY_ALREADY_SAVED.to_string(),
            Err(e) => {
                tracing::error!(user = %user, error = %e, "saving api key failed");
                STORE_UNAVAILABLE.to_string()
            }
        }
    }

    async fn dispatch(&self, user: UserId, api_key: String, input: Input) -> String {
        match input {
            Input::StatusQuery(order) => {
                match self.call(user, api_key, Action::Status, &order).await {
                    Ok(fields) => {
                        format_order_status(&order, &OrderStatus::from_fields(&fields))
                    }
                    Err(reply) => reply,
                }
            }
            Input::Action {
                order,
                action,
                word,
            } => match self.call(user, api_key, action, &order).await {
                Ok(_) => format_action_done(&word, &order),
                Err(reply) => reply,
            },
            Input::UnknownCommand { word, .. } => {
                tracing::debug!(user = %user, word = %word, "unknown order command");
                INVALID_COMMAND.to_string()
            }
            Input::Malformed => INVALID_FORMAT.to_string(),
        }
    }

    /// Run one API call. `Err` carries the reply to send instead of a result.
    async fn call(
        &self,
        user: UserId,
        api_key: String,
        action: Action,
        order: &OrderId,
    ) -> std::result::Result<serde_json::Map<String, serde_json::Value>, String> {
        let req = ActionRequest {
            api_key,
            action,
            order: order.clone(),
        };

        match self.api.request(&req).await {
            Ok(ActionResponse::Success(fields)) => Ok(fields),
            Ok(ActionResponse::Failure { error }) => {
                // The panel's error schema does not tell foreign orders apart
                // from other rejections; the reply stays generic, the log keeps detail.
                tracing::warn!(
                    user = %user,
                    action = action.as_api_str(),
                    order = %order,
                    api_error = %error,
                    "smm api rejected request"
                );
                Err(NOT_YOUR_ORDER.to_string())
            }
            Err(e) => {
                tracing::error!(
                    user = %user,
                    action = action.as_api_str(),
                    order = %order,
                    error = %e,
                    "smm api call failed"
                );
                Err(format_error_reply(&e).to_string())
            }
        }
    }
}
