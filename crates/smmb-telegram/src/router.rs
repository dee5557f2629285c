use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};

use smmb_core::{config::Config, messaging::port::MessagingPort, router::CommandRouter};

use crate::handlers;
use crate::TelegramMessenger;

#[derive(Clone)]
pub struct AppState {
    pub router: Arc<CommandRouter>,
    pub messenger: Arc<dyn MessagingPort>,
}

/// Long-poll Telegram until the process is stopped.
///
/// teloxide's default distribution keeps updates from one chat in order while
/// different chats are handled concurrently.
pub async fn run_polling(cfg: Arc<Config>, router: Arc<CommandRouter>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    match bot.get_me().await {
        Ok(me) => tracing::info!(bot = %me.username(), "smmb started"),
        Err(e) => tracing::warn!(error = %e, "get_me failed; continuing"),
    }
    tracing::info!(api = %cfg.smm_api_url, users_file = %cfg.users_file.display(), "config loaded");

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(bot.clone()));

    let state = Arc::new(AppState {
        router,
        messenger,
    });

    let handler =
        dptree::entry().branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    Ok(())
}
