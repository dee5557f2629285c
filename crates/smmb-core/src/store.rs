//! Per-user API key storage.
//!
//! The production store is one flat JSON object `{"<user id>": "<api key>"}`,
//! rewritten whole on every registration.

use std::{
    collections::HashMap,
    ffi::OsString,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{domain::UserId, Result};

/// User id (decimal string) to API key.
pub type UserMap = HashMap<String, String>;

/// Outcome of [`UserStore::register`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Registration {
    Saved,
    /// A key was already on file; it was left untouched.
    AlreadyPresent,
}

/// Port for the user store. The router only ever sees this trait.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn api_key(&self, user: UserId) -> Result<Option<String>>;

    /// Save `api_key` for `user` unless one is already stored.
    ///
    /// Implementations must make the check and the write a single atomic step.
    async fn register(&self, user: UserId, api_key: &str) -> Result<Registration>;
}

#[derive(Debug)]
pub struct JsonFileUserStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileUserStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Read the whole mapping. A missing or blank file is an empty mapping.
    pub async fn load(&self) -> Result<UserMap> {
        let txt = match tokio::fs::read_to_string(&self.path).await {
            Ok(txt) => txt,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(UserMap::new()),
            Err(e) => return Err(e.into()),
        };
        if txt.trim().is_empty() {
            return Ok(UserMap::new());
        }
        Ok(serde_json::from_str(&txt)?)
    }

    /// Replace the whole mapping on disk.
    ///
    /// Writes a sibling temp file and renames it over the target so readers
    /// never observe a partial file.
    pub async fn save(&self, users: &UserMap) -> Result<()> {
        let txt = serde_json::to_string(users)?;
        let tmp = tmp_path(&self.path);
        tokio::fs::write(&tmp, txt).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for JsonFileUserStore {
    async fn api_key(&self, user: UserId) -> Result<Option<String>> {
        let users = self.load().await?;
        Ok(users.get(&user.store_key()).cloned())
    }

    async fn register(&self, user: UserId, api_key: &str) -> Result<Registration> {
        let _guard = self.write_lock.lock().await;

        // Re-read under the lock so a concurrent registration is never lost.
        let mut users = self.load().await?;
        let key = user.store_key();
        if users.contains_key(&key) {
            return Ok(Registration::AlreadyPresent);
        }
        users.insert(key, api_key.to_string());
        self.save(&users).await?;
        Ok(Registration::Saved)
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("users.json"));
    name.push(format!(".{}.tmp", std::process::id()));
    path.with_file_name(name)
}
