//! Persistent storage for the session token
//!
//! The token lives in a single named slot. The sign-in flow writes it, the
//! guard and sign-out delete it. Deleting an absent token is a no-op, so the
//! slot tolerates several guards racing to evict the same credential.

use std::io;
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Name of the storage slot (and of the backing file)
pub const TOKEN_KEY: &str = "token";

/// Single-slot token storage
pub trait TokenStore: Send + Sync {
    /// Read the token, `None` when the slot is empty
    fn get(&self) -> Result<Option<String>>;

    /// Write the token, replacing any previous value
    fn set(&self, token: &str) -> Result<()>;

    /// Delete the token; succeeds when the slot is already empty
    fn remove(&self) -> Result<()>;
}

/// File-backed token store under the finop config directory
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store backed by the default slot at `~/.finop/token`
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(Self {
            path: home.join(".finop").join(TOKEN_KEY),
        })
    }

    /// Store backed by a specific file
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim().to_string();
                Ok((!token.is_empty()).then_some(token))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&self.path, token)?;

        // The token is a credential: 600 on Unix systems
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&self.path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&self.path, perms)?;
        }

        Ok(())
    }

    fn remove(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-memory store used as a test double
#[cfg(test)]
pub struct MemoryTokenStore {
    slot: std::sync::Mutex<Option<String>>,
}

#[cfg(test)]
impl MemoryTokenStore {
    pub fn new(token: Option<&str>) -> Self {
        Self {
            slot: std::sync::Mutex::new(token.map(str::to_string)),
        }
    }
}

#[cfg(test)]
impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Result<Option<String>> {
        Ok(self.slot.lock().expect("store lock").clone())
    }

    fn set(&self, token: &str) -> Result<()> {
        *self.slot.lock().expect("store lock") = Some(token.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        *self.slot.lock().expect("store lock") = None;
        Ok(())
    }
}
