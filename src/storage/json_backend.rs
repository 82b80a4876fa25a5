use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{ensure_dir, write_atomic, PathResolver},
    errors::Result,
    session::SessionSnapshot,
};

use super::SessionStore;

/// Stores the session as pretty-printed JSON in a single file.
#[derive(Debug, Clone)]
pub struct JsonSessionStore {
    path: PathBuf,
}

impl JsonSessionStore {
    /// `root` defaults to the application data directory.
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let base = PathResolver::resolve_base(root);
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::session_file_in(&base),
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for JsonSessionStore {
    /// A missing file means no session. A corrupt one is treated the same way
    /// so that a bad write never locks the user out of logging in again.
    fn load(&self) -> Result<Option<SessionSnapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.path)?;
        match serde_json::from_str(&data) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "ignoring unreadable session file");
                Ok(None)
            }
        }
    }

    fn save(&self, snapshot: &SessionSnapshot) -> Result<()> {
        let json = serde_json::to_string_pretty(snapshot)?;
        write_atomic(&self.path, &json)
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
