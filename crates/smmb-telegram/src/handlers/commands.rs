use smmb_core::{messaging::types::Command, router::CommandRouter};

pub(super) async fn handle_command(router: &CommandRouter, cmd: Command) -> String {
    match cmd.name.as_str() {
        "start" => router.handle_start(cmd.user_id).await,
        _ => router.handle_help(),
    }
}
