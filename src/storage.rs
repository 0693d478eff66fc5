use crate::constants::SESSION_FILE_NAME;
use crate::models::Session;
use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Durable storage for the logged-in session.
///
/// Cloned into both the auth slice (which writes it) and the
/// authenticated HTTP client (which reads the token on every request).
#[derive(Clone, Debug)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(data_dir: &Path) -> Self {
        SessionStore {
            path: data_dir.join(SESSION_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted session, if any
    pub fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        match serde_yaml::from_str::<Session>(&content) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Ignoring unreadable session file");
                Ok(None)
            }
        }
    }

    /// Current bearer token, read fresh from disk
    pub fn token(&self) -> Option<String> {
        match self.load() {
            Ok(session) => session.map(|s| s.token),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read session");
                None
            }
        }
    }

    /// Ensure the parent directory exists
    fn ensure_dir(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        Ok(())
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        self.ensure_dir()?;
        let content = serde_yaml::to_string(session)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    /// Forget the session. Clearing when nothing is stored is fine.
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
