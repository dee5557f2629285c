use smmb_core::{messaging::types::TextMessage, router::CommandRouter};

pub(super) async fn handle_text(router: &CommandRouter, msg: TextMessage) -> Option<String> {
    router.handle_text(msg.user_id, &msg.text).await
}
