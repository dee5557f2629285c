//! Telegram update handlers.
//!
//! Each handler is a small adapter that turns a teloxide `Message` into a core
//! `IncomingUpdate`, asks the command router for a reply and sends it back.

use std::sync::Arc;

use teloxide::{prelude::*, types::Message};

use smmb_core::{
    domain::{ChatId, UserId},
    messaging::types::{classify, IncomingUpdate},
    router::CommandRouter,
};

use crate::router::AppState;

mod commands;
mod text;

pub async fn handle_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(user) = msg.from() else {
        return Ok(());
    };
    // Stickers, photos and the like carry no command.
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let chat_id = ChatId(msg.chat.id.0);
    let update = classify(chat_id, UserId(user.id.0 as i64), text);

    if let Some(reply) = respond(&state.router, update).await {
        if let Err(e) = state.messenger.send_text(chat_id, &reply).await {
            tracing::warn!(chat = chat_id.0, error = %e, "sending reply failed");
        }
    }

    Ok(())
}

async fn respond(router: &CommandRouter, update: IncomingUpdate) -> Option<String> {
    match update {
        IncomingUpdate::Command(cmd) => Some(commands::handle_command(router, cmd).await),
        IncomingUpdate::Text(msg) => text::handle_text(router, msg).await,
    }
}
