//! Durable key-value storage and the credential records kept in it.
//!
//! Each key is one JSON file under `${CRIB_HOME}/storage`. Writes go through
//! a temp file in the same directory followed by a rename, so a reader sees
//! either the old value or the new one.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::config::paths;
use crate::error::{FlowError, FlowResult};
use crate::session::VerificationSession;

/// Key holding the signed-up user that still needs OTP verification.
pub const STAGED_USER_KEY: &str = "staged_user";
/// Key holding the logged-in user.
pub const CREDENTIALS_KEY: &str = "credentials";

/// User record as returned by the backend.
///
/// Unknown fields are preserved so nothing the backend sent is lost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredUser {
    #[serde(rename = "_id", alias = "userId")]
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StoredUser {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: None,
            extra: Map::new(),
        }
    }
}

/// Persisted login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub user: StoredUser,
    pub stored_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct KeyValueStore {
    dir: PathBuf,
}

impl KeyValueStore {
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> FlowResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(FlowError::persistence(format!("Invalid storage key: {key}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }

    pub fn get(&self, key: &str) -> FlowResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(FlowError::persistence(format!(
                "Failed to read {}: {e}",
                path.display()
            ))),
        }
    }

    pub fn set(&self, key: &str, value: &str) -> FlowResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|e| {
            FlowError::persistence(format!(
                "Failed to create directory {}: {e}",
                self.dir.display()
            ))
        })?;

        let write_err =
            |e: std::io::Error| FlowError::persistence(format!("Failed to write {key}: {e}"));
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(write_err)?;
        tmp.write_all(value.as_bytes()).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&path).map_err(|e| write_err(e.error))?;

        debug!(key, "stored value");
        Ok(())
    }

    /// Removes a key. Returns whether it existed.
    pub fn remove(&self, key: &str) -> FlowResult<bool> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(FlowError::persistence(format!(
                "Failed to remove {}: {e}",
                path.display()
            ))),
        }
    }
}

/// Explicit handle for the login state shared between screens.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    kv: KeyValueStore,
}

impl CredentialStore {
    pub fn new(kv: KeyValueStore) -> Self {
        Self { kv }
    }

    /// Opens the store under `${CRIB_HOME}/storage`.
    pub fn open_default() -> Self {
        Self::new(KeyValueStore::open(paths::storage_dir()))
    }

    pub fn stage(&self, user: &StoredUser) -> FlowResult<()> {
        self.write_json(STAGED_USER_KEY, user)
    }

    pub fn staged(&self) -> FlowResult<Option<StoredUser>> {
        self.read_json(STAGED_USER_KEY)
    }

    /// Stores the login for a verified session.
    ///
    /// The staged record is used when it belongs to the session; a staged
    /// record for another account is rejected. With nothing staged, a record
    /// is built from the session itself. The credentials write is atomic and
    /// the staged copy is removed only after it succeeded.
    pub fn promote_staged(&self, session: &VerificationSession) -> FlowResult<Credentials> {
        let user = match self.staged()? {
            Some(staged) if staged.id == session.user_id => staged,
            Some(staged) => {
                return Err(FlowError::persistence(format!(
                    "Staged user {} does not match verified user {}",
                    staged.id, session.user_id
                )));
            }
            None => StoredUser::new(session.user_id.clone(), session.email.clone()),
        };
        let credentials = self.save(user)?;

        if let Err(e) = self.kv.remove(STAGED_USER_KEY) {
            warn!(error = %e, "failed to clear staged user");
        }
        Ok(credentials)
    }

    pub fn save(&self, user: StoredUser) -> FlowResult<Credentials> {
        let credentials = Credentials {
            user,
            stored_at: Utc::now(),
        };
        self.write_json(CREDENTIALS_KEY, &credentials)?;
        Ok(credentials)
    }

    pub fn load(&self) -> FlowResult<Option<Credentials>> {
        self.read_json(CREDENTIALS_KEY)
    }

    /// Logs out. Returns whether credentials were present.
    pub fn clear(&self) -> FlowResult<bool> {
        self.kv.remove(CREDENTIALS_KEY)
    }

    fn read_json<T: serde::de::DeserializeOwned>(&self, key: &str) -> FlowResult<Option<T>> {
        let Some(raw) = self.kv.get(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| FlowError::persistence(format!("Failed to parse {key}: {e}")))
    }

    fn write_json<T: Serialize>(&self, key: &str, value: &T) -> FlowResult<()> {
        let raw = serde_json::to_string_pretty(value)
            .map_err(|e| FlowError::persistence(format!("Failed to encode {key}: {e}")))?;
        self.kv.set(key, &raw)
    }
}
