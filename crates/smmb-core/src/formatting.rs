//! User-facing reply texts.
//!
//! Replies are plain text (no parse mode), so nothing here needs escaping.

use crate::{
    domain::OrderId,
    errors::Error,
    smm::{Action, OrderStatus},
};

pub const KEY_SAVED: &str = "✅ API key saved successfully!";
pub const KEY_ALREADY_SAVED: &str = "✅ API key already saved.\nSend order ID or command.";
pub const ASK_FOR_KEY: &str = "🔐 Please send your SMM API key.";
pub const NOT_YOUR_ORDER: &str = "❌ This is not your order ID.";
pub const INVALID_COMMAND: &str = "❌ Invalid command.";
pub const INVALID_FORMAT: &str = "❌ Invalid format.\nExample:\n123456 cancel";

pub const API_TIMEOUT: &str = "⏱ The SMM API did not respond in time. Please try again later.";
pub const API_UNREACHABLE: &str = "⚠️ Could not reach the SMM API. Please try again later.";
pub const API_BAD_RESPONSE: &str = "⚠️ The SMM API returned an unexpected response.";
pub const STORE_UNAVAILABLE: &str =
    "⚠️ Could not access saved API keys. Please try again later.";
pub const INTERNAL_ERROR: &str = "⚠️ Something went wrong on our side. Please try again later.";

const MISSING: &str = "None";

pub fn format_order_status(order: &OrderId, status: &OrderStatus) -> String {
    let show = |v: &Option<String>| v.clone().unwrap_or_else(|| MISSING.to_string());
    format!(
        "📦 Order ID: {order}\n\
         📌 Status: {}\n\
         ⚙️ Service: {}\n\
         💰 Charge: {}\n\
         🔢 Start: {}\n\
         📉 Remains: {}",
        show(&status.status),
        show(&status.service),
        show(&status.charge),
        show(&status.start_count),
        show(&status.remains),
    )
}

/// `word` is the command as the user typed it (lower-cased), e.g. `fake`.
pub fn format_action_done(word: &str, order: &OrderId) -> String {
    format!("✅ Action `{word}` processed for Order {order}")
}

/// Reply for a failure that never reached a decoded panel response.
pub fn format_error_reply(err: &Error) -> &'static str {
    match err {
        Error::Timeout(_) => API_TIMEOUT,
        Error::Transport(_) => API_UNREACHABLE,
        Error::BadResponse(_) => API_BAD_RESPONSE,
        Error::Io(_) | Error::Json(_) => STORE_UNAVAILABLE,
        Error::Config(_) | Error::External(_) => INTERNAL_ERROR,
    }
}

pub fn help_text() -> String {
    let words = Action::COMMANDS
        .iter()
        .map(|(word, _)| *word)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "ℹ️ Usage\n\
         First message: your SMM API key.\n\
         Order status: send the order ID, e.g. 123456\n\
         Order action: send the order ID and a command, e.g. 123456 cancel\n\
         Commands: {words}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_template_lists_every_field() {
        let order = OrderId::parse("123456").unwrap();
        let status = OrderStatus {
            status: Some("In progress".to_string()),
            service: Some("12".to_string()),
            charge: Some("0.5".to_string()),
            start_count: Some("100".to_string()),
            remains: None,
        };
        assert_eq!(
            format_order_status(&order, &status),
            "📦 Order ID: 123456\n📌 Status: In progress\n⚙️ Service: 12\n💰 Charge: 0.5\n🔢 Start: 100\n📉 Remains: None"
        );
    }

    #[test]
    fn action_reply_quotes_the_typed_word() {
        let order = OrderId::parse("9").unwrap();
        assert_eq!(
            format_action_done("fake", &order),
            "✅ Action `fake` processed for Order 9"
        );
    }

    #[test]
    fn failures_get_distinct_replies() {
        assert_eq!(format_error_reply(&Error::Timeout(30)), API_TIMEOUT);
        assert_eq!(
            format_error_reply(&Error::Transport("refused".into())),
            API_UNREACHABLE
        );
        assert_eq!(
            format_error_reply(&Error::BadResponse("<html>".into())),
            API_BAD_RESPONSE
        );
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(format_error_reply(&Error::Io(io)), STORE_UNAVAILABLE);
        assert_eq!(
            format_error_reply(&Error::Config("http client build failed".into())),
            INTERNAL_ERROR
        );
        assert_eq!(
            format_error_reply(&Error::External("telegram error".into())),
            INTERNAL_ERROR
        );
    }

    #[test]
    fn help_lists_command_words() {
        let help = help_text();
        for word in ["speed", "cancel", "partial", "refill", "fake"] {
            assert!(help.contains(word), "{word} missing from help");
        }
    }
}
