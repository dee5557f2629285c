/// Core error type for the bot.
///
/// Adapter crates should map their specific errors into this type so the router
/// can turn every failure into a distinct user-facing reply.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("smm api timed out after {0}s")]
    Timeout(u64),

    #[error("smm api transport error: {0}")]
    Transport(String),

    #[error("smm api returned a non-json body: {0}")]
    BadResponse(String),

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
