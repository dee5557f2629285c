use std::{
    collections::HashMap,
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{errors::Error, Result};

pub const DEFAULT_API_URL: &str = "https://xtrasmm.in/api/v2";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USERS_FILE: &str = "users.json";

/// Typed configuration for the bot, read from the process environment.
#[derive(Clone, Debug)]
pub struct Config {
    pub telegram_bot_token: String,

    // SMM panel
    pub smm_api_url: String,
    pub smm_api_timeout: Duration,

    // Persistence
    pub users_file: PathBuf,
}

impl Config {
    /// Read the process environment, falling back to `./.env` for unset keys.
    ///
    /// The `.env` values are layered in the lookup; the process environment is
    /// never modified.
    pub fn load() -> Result<Self> {
        let dotenv = read_dotenv(Path::new(".env"));
        Self::from_lookup(layered_lookup(|key| env::var(key).ok(), dotenv))
    }

    /// Build a config from an arbitrary variable source (tests use a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let telegram_bot_token = lookup("BOT_TOKEN")
            .and_then(non_empty)
            .or_else(|| lookup("TELEGRAM_BOT_TOKEN").and_then(non_empty))
            .ok_or_else(|| {
                Error::Config("BOT_TOKEN environment variable is required".to_string())
            })?;

        let smm_api_url = lookup("SMM_API_URL")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout_secs = match lookup("SMM_API_TIMEOUT_SECS").and_then(non_empty) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                Error::Config(format!("SMM_API_TIMEOUT_SECS must be an integer, got {raw:?}"))
            })?,
            None => DEFAULT_API_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(Error::Config(
                "SMM_API_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        let users_file = PathBuf::from(
            lookup("USERS_FILE")
                .and_then(non_empty)
                .unwrap_or_else(|| DEFAULT_USERS_FILE.to_string()),
        );

        Ok(Self {
            telegram_bot_token,
            smm_api_url,
            smm_api_timeout: Duration::from_secs(timeout_secs),
            users_file,
        })
    }
}

fn read_dotenv(path: &Path) -> HashMap<String, String> {
    let Ok(contents) = fs::read_to_string(path) else {
        return HashMap::new();
    };
    parse_dotenv(&contents).into_iter().collect()
}

/// Process env wins; `.env` only fills keys the env does not set.
fn layered_lookup(
    env_lookup: impl Fn(&str) -> Option<String>,
    dotenv: HashMap<String, String>,
) -> impl Fn(&str) -> Option<String> {
    move |key: &str| env_lookup(key).or_else(|| dotenv.get(key).cloned())
}

fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        out.push((key.to_string(), val));
    }
    out
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
