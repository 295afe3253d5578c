//! Session capability.
//!
//! The session is an explicit object threaded into whatever needs it —
//! there is no ambient authentication context to reach into. The store
//! persists the opaque token/user blob the backend hands out at login.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::users::models::{Role, User};

/// An authenticated session: the bearer token plus the logged-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    /// The logged-in user's role.
    pub fn role(&self) -> Role {
        self.user.role
    }

    /// Whether this session may use the admin back-office.
    pub fn is_admin(&self) -> bool {
        self.user.role == Role::Admin
    }
}

/// Failures while reading or writing the session file.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("session file error")]
    Io(#[from] std::io::Error),

    #[error("session file is not valid JSON")]
    Encoding(#[from] serde_json::Error),
}

/// File-backed persistence for the session blob.
///
/// Set at login, cleared at logout. A missing or unreadable file simply
/// means "not logged in" — it never fails a read.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// A store persisting at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Where the blob lives.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The persisted session, if a valid one exists.
    pub fn load(&self) -> Option<Session> {
        let text = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&text) {
            Ok(session) => Some(session),
            Err(error) => {
                tracing::warn!(error = %error, "ignoring corrupt session file");
                None
            }
        }
    }

    /// Persist a session blob.
    ///
    /// # Errors
    ///
    /// Filesystem or encoding failures.
    pub fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, text)?;
        Ok(())
    }

    /// Remove the persisted session. Clearing an absent session is fine.
    ///
    /// # Errors
    ///
    /// Filesystem failures other than the file already being gone.
    pub fn clear(&self) -> Result<(), SessionStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}
