//! Telegram adapter (teloxide).
//!
//! This crate implements the `smmb-core` MessagingPort over the Telegram Bot API
//! and wires incoming updates into the core command router.

use std::time::Duration;

use async_trait::async_trait;

use teloxide::prelude::*;

use tokio::time::sleep;

pub mod handlers;
pub mod router;

use smmb_core::{
    domain::ChatId,
    errors::Error,
    messaging::{port::MessagingPort, types::MessagingCapabilities},
    Result,
};

#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    fn tg_chat(chat_id: ChatId) -> teloxide::types::ChatId {
        teloxide::types::ChatId(chat_id.0)
    }

    fn map_err(e: teloxide::RequestError) -> Error {
        Error::External(format!("telegram error: {e}"))
    }

    async fn with_retry<T, Fut>(&self, mut op: impl FnMut() -> Fut) -> Result<T>
    where
        Fut: std::future::IntoFuture<Output = std::result::Result<T, teloxide::RequestError>>,
        Fut::IntoFuture: Send,
    {
        let mut attempts = 0usize;
        loop {
            match op().await {
                Ok(v) => return Ok(v),
                Err(e) => match retry_delay(&e, attempts) {
                    Some(d) => {
                        attempts += 1;
                        sleep(d).await;
                        continue;
                    }
                    None => return Err(Self::map_err(e)),
                },
            }
        }
    }
}

/// Flood-control wait before another attempt, if one is still allowed.
fn retry_delay(e: &teloxide::RequestError, attempts: usize) -> Option<Duration> {
    const MAX_RETRIES: usize = 1;
    match e {
        teloxide::RequestError::RetryAfter(d) if attempts < MAX_RETRIES => Some(*d),
        _ => None,
    }
}

#[async_trait]
impl MessagingPort for TelegramMessenger {
    fn capabilities(&self) -> MessagingCapabilities {
        MessagingCapabilities {
            max_message_len: 4096,
        }
    }

    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<()> {
        let limit = self.capabilities().max_message_len;
        let text: String = text.chars().take(limit).collect();
        self.with_retry(|| self.bot.send_message(Self::tg_chat(chat_id), text.clone()))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_after_is_honoured_once() {
        let e = teloxide::RequestError::RetryAfter(Duration::from_secs(3));
        assert_eq!(retry_delay(&e, 0), Some(Duration::from_secs(3)));
        assert_eq!(retry_delay(&e, 1), None);
    }

    #[test]
    fn other_errors_are_not_retried() {
        let e = teloxide::RequestError::Api(teloxide::ApiError::BotBlocked);
        assert_eq!(retry_delay(&e, 0), None);
    }
}
