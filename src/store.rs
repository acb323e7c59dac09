//! Persisted session state.
//!
//! One JSON blob under a fixed file name, read once at startup and written
//! on every committed session change. Missing or corrupt data falls back to
//! the default empty session; persistence failures are logged and never
//! surfaced to the user.

use std::fs;
use std::io;
use std::path::PathBuf;

use crate::models::Session;

const SESSION_FILE: &str = "session.json";
const LOG_FILE: &str = "perfily.log";

/// File-backed store for the single [`Session`] record.
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Platform data directory, falling back to the working directory.
    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join("perfily"))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Log file colocated with the session blob.
    pub fn log_path(&self) -> PathBuf {
        self.dir.join(LOG_FILE)
    }

    fn session_path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }

    /// Load the persisted session, or the empty default when the blob is
    /// missing or unreadable.
    pub fn load(&self) -> Session {
        let path = self.session_path();
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(_) => return Session::default(),
        };

        match serde_json::from_str(&raw) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("discarding corrupt session blob {}: {e}", path.display());
                Session::default()
            }
        }
    }

    /// Persist the session, best-effort.
    pub fn save(&self, session: &Session) {
        if let Err(e) = self.try_save(session) {
            tracing::warn!("failed to persist session: {e}");
        }
    }

    fn try_save(&self, session: &Session) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let raw = serde_json::to_string(session).map_err(io::Error::other)?;
        fs::write(self.session_path(), raw)
    }
}
