//! File-backed session credentials.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::traits::SessionProvider;

/// Environment variable overriding the stored access token.
pub const ENV_ACCESS_TOKEN: &str = "ZENALYZE_ACCESS_TOKEN";
/// Environment variable overriding the stored user id.
pub const ENV_USER_ID: &str = "ZENALYZE_USER_ID";

const SESSION_DIR: &str = "zenalyze";
const SESSION_FILE: &str = "session.json";

/// Errors persisting the session file.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to write session file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode session: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A stored session as issued by the backend's auth service.
///
/// Both fields optional: an absent token means signed-out, in which case
/// chat falls back to the publishable key and user-owned rows are
/// unavailable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub access_token: Option<String>,
    pub user_id: Option<String>,
}

impl Session {
    pub fn is_signed_in(&self) -> bool {
        self.access_token.is_some() && self.user_id.is_some()
    }
}

impl SessionProvider for Session {
    fn bearer_token(&self) -> Option<String> {
        self.access_token.clone()
    }

    fn user_id(&self) -> Option<String> {
        self.user_id.clone()
    }
}

/// Loads and saves the session file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store at the default location under the user config dir.
    pub fn new() -> Self {
        let path = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(SESSION_DIR)
            .join(SESSION_FILE);
        Self { path }
    }

    /// Store at an explicit path (tests).
    pub fn at(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the session, preferring env overrides over the file.
    ///
    /// Returns a signed-out session when neither exists or the file is
    /// unreadable; a corrupt session file is not fatal.
    pub fn load(&self) -> Session {
        if let (Ok(token), Ok(user_id)) =
            (std::env::var(ENV_ACCESS_TOKEN), std::env::var(ENV_USER_ID))
        {
            if !token.is_empty() && !user_id.is_empty() {
                return Session {
                    access_token: Some(token),
                    user_id: Some(user_id),
                };
            }
        }

        match fs::read_to_string(&self.path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(path = %self.path.display(), error = %e, "corrupt session file");
                Session::default()
            }),
            Err(_) => Session::default(),
        }
    }

    /// Write the session to disk, creating the parent directory.
    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| SessionError::Write {
                path: self.path.clone(),
                source,
            })?;
        }
        let raw = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, raw).map_err(|source| SessionError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        std::env::remove_var(ENV_ACCESS_TOKEN);
        std::env::remove_var(ENV_USER_ID);
    }

    #[test]
    #[serial]
    fn save_then_load_round_trips() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::at(&dir.path().join("nested").join("session.json"));

        let session = Session {
            access_token: Some("tok".into()),
            user_id: Some("uid".into()),
        };
        store.save(&session).unwrap();
        assert_eq!(store.load(), session);
        assert!(store.load().is_signed_in());
    }

    #[test]
    #[serial]
    fn missing_file_is_signed_out() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::at(&dir.path().join("absent.json"));
        let session = store.load();
        assert!(!session.is_signed_in());
        assert!(session.bearer_token().is_none());
    }

    #[test]
    #[serial]
    fn corrupt_file_is_signed_out() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{{{").unwrap();
        assert!(!SessionStore::at(&path).load().is_signed_in());
    }

    #[test]
    #[serial]
    fn env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::at(&dir.path().join("session.json"));
        store
            .save(&Session {
                access_token: Some("file-tok".into()),
                user_id: Some("file-uid".into()),
            })
            .unwrap();

        std::env::set_var(ENV_ACCESS_TOKEN, "env-tok");
        std::env::set_var(ENV_USER_ID, "env-uid");
        let session = store.load();
        clear_env();

        assert_eq!(session.access_token.as_deref(), Some("env-tok"));
        assert_eq!(session.user_id.as_deref(), Some("env-uid"));
    }
}
