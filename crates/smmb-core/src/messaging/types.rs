use crate::domain::{ChatId, UserId};

/// Capabilities of a messenger implementation.
#[derive(Clone, Copy, Debug)]
pub struct MessagingCapabilities {
    pub max_message_len: usize,
}

/// Messenger-agnostic incoming update, as the router consumes it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IncomingUpdate {
    Command(Command),
    Text(TextMessage),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command {
    pub chat_id: ChatId,
    pub user_id: UserId,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextMessage {
    pub chat_id: ChatId,
    pub user_id: UserId,
    pub text: String,
}

/// Split `/cmd@botname args` into a lower-cased command name and its arguments.
pub fn parse_command(text: &str) -> (String, String) {
    let mut parts = text.trim().splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("").trim();
    let rest = parts.next().unwrap_or("").trim().to_string();

    let cmd = first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or("")
        .to_lowercase();

    (cmd, rest)
}

/// Classify raw message text. Slash-prefixed text is a command.
pub fn classify(chat_id: ChatId, user_id: UserId, text: &str) -> IncomingUpdate {
    if text.trim_start().starts_with('/') {
        // No command takes arguments.
        let (name, _args) = parse_command(text);
        IncomingUpdate::Command(Command {
            chat_id,
            user_id,
            name,
        })
    } else {
        IncomingUpdate::Text(TextMessage {
            chat_id,
            user_id,
            text: text.to_string(),
        })
    }
}
